use crate::placement::DEFAULT_RIGHT_INSET_EM;

/// Options for [`super::PopupSurfaceController`].
#[derive(Clone, Debug)]
pub struct PopupWindowOptions {
    /// Identity name given to the embedded surface; extension content can read it.
    pub surface_name: String,

    /// Inset from the right viewport edge (in `em`) when the popup would overflow to the right
    /// and is flipped to right-anchoring.
    pub right_inset_em: f32,

    /// If true, record lifecycle events in a small ring buffer (see
    /// [`super::PopupSurfaceController::debug_log_text`]).
    pub debug_event_log: bool,

    /// Maximum number of debug log lines to keep (ring buffer).
    pub debug_event_log_capacity: usize,
}

impl Default for PopupWindowOptions {
    fn default() -> Self {
        Self {
            surface_name: "browserAction".to_owned(),
            right_inset_em: DEFAULT_RIGHT_INSET_EM,
            debug_event_log: false,
            debug_event_log_capacity: 200,
        }
    }
}
