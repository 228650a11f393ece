use super::surface::EmbeddedSurface;

/// Progress of the first-paint workaround.
///
/// The very first paint of an embedded surface can come out blank. Toggling its visibility
/// across animation frames forces a redraw:
/// wait a frame, hide, wait a frame, show, wait a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForcedRedraw {
    /// Next frame hides the surface.
    HideNextFrame,
    /// Next frame shows the surface again.
    ShowNextFrame,
    /// Next frame completes the workaround.
    SettleNextFrame,
    Done,
}

impl ForcedRedraw {
    pub fn is_pending(self) -> bool {
        self != Self::Done
    }

    /// Run the step due on this animation frame.
    ///
    /// A surface that is no longer attached ends the sequence without touching it.
    pub(super) fn on_animation_frame(self, surface: &mut dyn EmbeddedSurface) -> Self {
        if self.is_pending() && !surface.is_attached() {
            log::trace!(
                "forced redraw of {:?} abandoned: surface detached",
                surface.id()
            );
            return Self::Done;
        }

        match self {
            Self::HideNextFrame => {
                surface.set_visible(false);
                Self::ShowNextFrame
            }
            Self::ShowNextFrame => {
                surface.set_visible(true);
                Self::SettleNextFrame
            }
            Self::SettleNextFrame | Self::Done => Self::Done,
        }
    }
}
