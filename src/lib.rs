//! Browser-shell chrome widgets for [`egui`].
//!
//! - [`PopupSurfaceController`]: an embedded content surface shown as an auto-sizing,
//!   viewport-aware popup (extension browser-action popups and the like).
//! - [`placement`]: the pure placement policy the popup uses to stay inside the viewport.
//! - [`TabPageDropZone`]: one page of a paged tab strip, acting as a drop target for dragged tabs.
//!
//! Widgets never mutate the host's state: every change is sent as a [`ShellCommand`] on a
//! [`CommandBus`] the host drains once per frame.

#![forbid(unsafe_code)]

pub mod commands;
pub mod debug_log;
pub mod keyboard;
pub mod placement;
pub mod popup;
pub mod tab_page;
pub mod types;

pub use commands::{CommandBus, InsertSide, ShellCommand};
pub use debug_log::{DebugEventLog, MAX_DEBUG_EVENT_LOG_CAPACITY};
pub use keyboard::{KeySubscription, KeyboardHub};
pub use placement::{AnchoredRect, HorizontalEdge, Placement, VerticalEdge, place};
pub use popup::{
    EmbeddedSurface, ForcedRedraw, LoadState, PopupDetail, PopupLayout, PopupSurfaceController,
    PopupWindowOptions, SurfaceError, SurfaceEvent, SurfaceId, SurfacePhase,
};
pub use tab_page::{
    DataTransfer, DragData, DragOrigin, DragTabPayload, DropEffect, DropOutcome,
    TAB_DRAG_TYPE, TAB_PAGE_INDICATOR_SIZE, TabFrame, TabPageContextMenu, TabPageDropZone,
    TabPageFrames, TabPageProps, TabPageVisuals, TabPages, apply_page_hover,
};
pub use types::{TabId, TabKey, WindowId};
