use egui::{Response, Sense, StrokeKind, Ui, Vec2};

use crate::commands::CommandBus;

use super::{DataTransfer, DragTabPayload, TabPageContextMenu, TabPageDropZone};

/// Size of one page indicator, in points.
pub const TAB_PAGE_INDICATOR_SIZE: Vec2 = Vec2::new(28.0, 10.0);

impl TabPageDropZone<'_> {
    /// Show the page indicator and translate this pass's pointer and drag-and-drop activity
    /// into gestures.
    ///
    /// `hovered` is the container's hover flag for this page; enter/leave are reported when
    /// the pointer disagrees with it. Dragged tabs must be published with
    /// [`egui::Response::dnd_set_drag_payload`] as a [`DragTabPayload`].
    pub fn ui(
        &self,
        ui: &mut Ui,
        hovered: bool,
        bus: &CommandBus,
        menu: &mut dyn TabPageContextMenu,
    ) -> Response {
        let (rect, response) = ui.allocate_exact_size(TAB_PAGE_INDICATOR_SIZE, Sense::click());

        let pointer_inside = response.contains_pointer();
        if pointer_inside && !hovered {
            self.on_mouse_enter(bus);
        } else if !pointer_inside && hovered {
            self.on_mouse_leave(bus);
        }

        let drag_hovered = if let Some(payload) = response.dnd_hover_payload::<DragTabPayload>() {
            let mut transfer = DataTransfer::with_tab(*payload);
            self.on_drag_over(&mut transfer);
            transfer.default_prevented()
        } else {
            false
        };

        if let Some(payload) = response.dnd_release_payload::<DragTabPayload>() {
            self.on_drop(&DataTransfer::with_tab(*payload), bus);
        }

        if response.clicked() {
            self.on_click(bus);
        }
        if response.secondary_clicked() {
            self.on_context_menu(menu);
        }

        if ui.is_rect_visible(rect) {
            let visuals = self.visuals();
            let widget = ui.style().interact(&response);
            let fill = if visuals.active {
                ui.visuals().selection.bg_fill
            } else {
                widget.weak_bg_fill
            };
            let stroke = if drag_hovered {
                ui.visuals().selection.stroke
            } else {
                widget.bg_stroke
            };
            ui.painter().rect(rect, 3.0, fill, stroke, StrokeKind::Inside);

            if visuals.audio_playback_active {
                ui.painter().circle_filled(
                    rect.right_center() - Vec2::new(rect.height() * 0.5, 0.0),
                    rect.height() * 0.25,
                    widget.fg_stroke.color,
                );
            }
        }

        response
    }
}
