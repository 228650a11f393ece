use egui::{Key, Vec2};

use crate::commands::{CommandBus, ShellCommand};
use crate::debug_log::DebugEventLog;
use crate::keyboard::{KeyboardHub, KeySubscription};
use crate::placement::{Placement, place};

mod detail;
mod lifecycle;
mod options;
mod redraw;
mod surface;
mod ui;


pub use detail::PopupDetail;
pub use lifecycle::{LoadState, SurfacePhase};
pub use options::PopupWindowOptions;
pub use redraw::ForcedRedraw;
pub use surface::{EmbeddedSurface, SurfaceError, SurfaceEvent, SurfaceId};

/// Where and how to draw the popup this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopupLayout {
    pub placement: Placement,

    /// Last size reported by the content, if any.
    pub preferred_size: Option<Vec2>,
}

/// Drives one embedded content surface shown as a floating popup (e.g. an extension's
/// browser-action popup).
///
/// The controller reads a [`PopupDetail`] snapshot provided by the host and requests changes
/// through a [`CommandBus`]; it never edits the detail itself.
///
/// Current scope:
/// - Create and configure the surface on mount, listen for Escape while mounted.
/// - Work around blank first paints with a one-time hide/show across animation frames.
/// - Auto-size: once no load is in flight, every preferred-size report resizes the surface and
///   is sent upstream as a detail update.
/// - Crash/destroy/close dismiss the popup; nothing is retried or recreated.
#[derive(Debug)]
pub struct PopupSurfaceController<S> {
    pub options: PopupWindowOptions,

    detail: PopupDetail,
    surface: Option<S>,
    phase: SurfacePhase,
    bus: CommandBus,
    escape_subscription: Option<KeySubscription>,
    debug_log: DebugEventLog,
}

impl<S: EmbeddedSurface> PopupSurfaceController<S> {
    /// Mount the popup described by `detail`.
    ///
    /// With an empty `src` the controller stays [`SurfacePhase::Inert`]: `create_surface` is
    /// not called and no key listener is registered.
    pub fn mount(
        detail: PopupDetail,
        create_surface: impl FnOnce() -> S,
        keyboard: &KeyboardHub,
        bus: CommandBus,
        options: PopupWindowOptions,
    ) -> Self {
        let mut debug_log =
            DebugEventLog::new(options.debug_event_log, options.debug_event_log_capacity);

        let Some(src) = detail.src().map(str::to_owned) else {
            debug_log.push("mount inert (no src)");
            return Self {
                options,
                detail,
                surface: None,
                phase: SurfacePhase::Inert,
                bus,
                escape_subscription: None,
                debug_log,
            };
        };

        let mut surface = create_surface();
        surface.set_src(&src);
        surface.set_name(&options.surface_name);
        log::debug!("popup surface {:?} created for {src}", surface.id());
        debug_log.push(format!("mount surface={:?} src={src}", surface.id()));

        let escape_subscription = {
            let bus = bus.clone();
            keyboard.subscribe(move |key| {
                if key == Key::Escape {
                    bus.dispatch(ShellCommand::ClearPopupDetail);
                }
            })
        };

        Self {
            options,
            detail,
            surface: Some(surface),
            phase: SurfacePhase::Attaching {
                load: LoadState::Settled,
            },
            bus,
            escape_subscription: Some(escape_subscription),
            debug_log,
        }
    }

    /// Release the key listener and hand the surface back to the host for disposal.
    pub fn unmount(self) -> Option<S> {
        let Self {
            surface,
            escape_subscription,
            ..
        } = self;
        if let Some(subscription) = escape_subscription {
            subscription.release();
        }
        if let Some(surface) = &surface {
            log::debug!("popup surface {:?} unmounted", surface.id());
        }
        surface
    }

    pub fn detail(&self) -> &PopupDetail {
        &self.detail
    }

    /// Replace the detail snapshot (the host's store changed).
    ///
    /// The surface is not reloaded when `src` changes: a new popup means a new controller.
    pub fn update_detail(&mut self, detail: PopupDetail) {
        self.detail = detail;
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn surface_id(&self) -> Option<SurfaceId> {
        self.surface.as_ref().map(EmbeddedSurface::id)
    }

    pub fn phase(&self) -> SurfacePhase {
        self.phase
    }

    pub fn has_drawn_once(&self) -> bool {
        self.phase.has_drawn_once()
    }

    pub fn is_load_in_flight(&self) -> bool {
        self.phase.load() == Some(LoadState::InFlight)
    }

    pub fn is_redraw_pending(&self) -> bool {
        matches!(self.phase, SurfacePhase::Idle { redraw, .. } if redraw.is_pending())
    }

    /// Feed a lifecycle event emitted by the surface `source`.
    ///
    /// Events from any surface other than the live one are ignored.
    pub fn handle_event(&mut self, source: SurfaceId, event: SurfaceEvent) {
        if self.surface_id() != Some(source) {
            log::trace!("ignoring {event:?} from stale surface {source:?}");
            return;
        }
        self.debug_log
            .push(format!("event {event:?} phase={:?}", self.phase));

        match (self.phase, event) {
            (SurfacePhase::Inert | SurfacePhase::Dismissed { .. }, _) => {
                log::trace!("ignoring {event:?}: popup is {:?}", self.phase);
            }
            (_, event) if event.is_terminal() => {
                log::debug!("popup surface {source:?} ended with {event:?}: dismissing");
                self.bus.dispatch(ShellCommand::ClearPopupDetail);
                self.phase = self.phase.dismissed();
            }
            (SurfacePhase::Attaching { load }, SurfaceEvent::DidAttach) => {
                self.enable_preferred_size_reporting();
                self.phase = SurfacePhase::Idle {
                    load,
                    redraw: ForcedRedraw::HideNextFrame,
                };
                self.debug_log.push("forced redraw scheduled");
            }
            (SurfacePhase::Idle { .. }, SurfaceEvent::DidAttach) => {
                self.enable_preferred_size_reporting();
            }
            (_, SurfaceEvent::LoadStart) => {
                self.phase = self.phase.with_load(LoadState::InFlight);
            }
            (_, event) if event.ends_load() => {
                self.phase = self.phase.with_load(LoadState::Settled);
            }
            (
                SurfacePhase::Idle {
                    load: LoadState::Settled,
                    ..
                },
                SurfaceEvent::PreferredSizeChanged,
            ) => {
                self.apply_preferred_size();
            }
            (phase, event) => {
                log::trace!("ignoring {event:?} in {phase:?}");
            }
        }
    }

    /// Run work aligned to an animation frame (the forced-redraw steps).
    pub fn on_animation_frame(&mut self) {
        let SurfacePhase::Idle { load, redraw } = self.phase else {
            return;
        };
        if !redraw.is_pending() {
            return;
        }
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        let next = redraw.on_animation_frame(surface);
        self.debug_log
            .push(format!("forced redraw {redraw:?} -> {next:?}"));
        self.phase = SurfacePhase::Idle { load, redraw: next };
    }

    /// Placement for the current snapshot inside a viewport of the given size.
    ///
    /// Call this every frame with the live viewport size; nothing is cached.
    pub fn layout(&self, viewport: Vec2) -> Option<PopupLayout> {
        if self.surface.is_none() || self.detail.is_empty() {
            return None;
        }
        Some(PopupLayout {
            placement: place(
                self.detail.anchored_rect(),
                viewport,
                self.options.right_inset_em,
            ),
            preferred_size: self.detail.preferred_size(),
        })
    }

    pub fn debug_log_text(&self) -> String {
        self.debug_log.text()
    }

    pub fn clear_debug_log(&mut self) {
        self.debug_log.clear();
    }

    fn enable_preferred_size_reporting(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.set_preferred_size_reporting(true);
        }
    }

    fn apply_preferred_size(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let size = match surface.preferred_size() {
            Ok(size) => size,
            Err(err) => {
                log::warn!("popup surface {:?}: {err}", surface.id());
                return;
            }
        };
        surface.set_size(size);

        let width = size.x.round() as i32;
        let height = size.y.round() as i32;
        self.debug_log
            .push(format!("preferred size {width}x{height}"));

        self.bus
            .dispatch(ShellCommand::UpdatePopupDetail(PopupDetail {
                src: self.detail.src.clone(),
                top: self.detail.top,
                left: self.detail.left,
                width: Some(width),
                height: Some(height),
            }));
    }
}
