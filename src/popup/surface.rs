use egui::Vec2;

/// Identity of one embedded surface instance.
///
/// Events carry the id of the surface that emitted them, so a controller can tell late events
/// from a replaced surface apart from events of its live one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(pub u64);

/// Lifecycle notifications emitted by an embedded content surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceEvent {
    Crashed,
    Destroyed,
    Close,
    DidAttach,
    LoadStart,
    DidFinishLoad,
    DidFailLoad,
    DidFailProvisionalLoad,
    PreferredSizeChanged,
}

impl SurfaceEvent {
    /// Events after which the surface is gone for good.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Crashed | Self::Destroyed | Self::Close)
    }

    /// Events that end an in-flight load, successfully or not.
    pub fn ends_load(self) -> bool {
        matches!(
            self,
            Self::DidFinishLoad | Self::DidFailLoad | Self::DidFailProvisionalLoad
        )
    }
}

#[derive(Debug)]
pub enum SurfaceError {
    /// The surface is no longer attached to a host window.
    Detached,
    /// The host could not answer the query.
    QueryFailed(String),
}

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Detached => write!(f, "embedded surface is detached"),
            Self::QueryFailed(reason) => write!(f, "embedded surface query failed: {reason}"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// The host environment's handle to an embedded web-content view.
///
/// Implementations wrap whatever the host uses (a native webview, an offscreen browser, a
/// test double). The controller only ever talks to the surface through this trait.
pub trait EmbeddedSurface {
    fn id(&self) -> SurfaceId;

    fn set_src(&mut self, src: &str);

    /// The identity name the content sees (e.g. `browserAction`).
    fn set_name(&mut self, name: &str);

    /// Toggle automatic `PreferredSizeChanged` reporting.
    fn set_preferred_size_reporting(&mut self, enabled: bool);

    /// The natural size of the current content, in points.
    ///
    /// # Errors
    /// Fails when the surface went away or the host cannot measure it.
    fn preferred_size(&self) -> Result<Vec2, SurfaceError>;

    fn set_visible(&mut self, visible: bool);

    /// Size the surface is rendered at, in points.
    fn set_size(&mut self, size: Vec2);

    /// False once the host detached or disposed of the surface.
    fn is_attached(&self) -> bool;
}
