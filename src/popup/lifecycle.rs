use super::redraw::ForcedRedraw;

/// Whether the embedded content is between a load start and its finish/failure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Settled,
    /// Size reports are suppressed: intermediate layouts would make the popup flicker.
    InFlight,
}

/// Where a [`super::PopupSurfaceController`] is in its surface lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfacePhase {
    /// Mounted without a source: no surface, no key listener, no commands.
    Inert,

    /// Surface created and configured, waiting for the host to attach it.
    Attaching { load: LoadState },

    /// Attached with preferred-size reporting on. Reaching this phase starts the one-time
    /// forced redraw.
    Idle {
        load: LoadState,
        redraw: ForcedRedraw,
    },

    /// The surface crashed, was destroyed or closed itself; dismissal was requested.
    Dismissed { has_drawn_once: bool },
}

impl SurfacePhase {
    pub fn load(self) -> Option<LoadState> {
        match self {
            Self::Attaching { load } | Self::Idle { load, .. } => Some(load),
            Self::Inert | Self::Dismissed { .. } => None,
        }
    }

    pub fn has_drawn_once(self) -> bool {
        match self {
            Self::Idle { .. } => true,
            Self::Dismissed { has_drawn_once } => has_drawn_once,
            Self::Inert | Self::Attaching { .. } => false,
        }
    }

    pub fn is_live(self) -> bool {
        matches!(self, Self::Attaching { .. } | Self::Idle { .. })
    }

    pub(super) fn with_load(self, new_load: LoadState) -> Self {
        match self {
            Self::Attaching { .. } => Self::Attaching { load: new_load },
            Self::Idle { redraw, .. } => Self::Idle {
                load: new_load,
                redraw,
            },
            Self::Inert | Self::Dismissed { .. } => self,
        }
    }

    pub(super) fn dismissed(self) -> Self {
        Self::Dismissed {
            has_drawn_once: self.has_drawn_once(),
        }
    }
}
