use egui::{Context, Order, Vec2};

use super::{EmbeddedSurface, PopupSurfaceController};

impl<S: EmbeddedSurface> PopupSurfaceController<S> {
    /// Show the popup frame for this pass and advance frame-aligned work.
    ///
    /// The frame reserves the surface's preferred size at the placement computed from the live
    /// screen rect; the host composites the surface itself into that rect. Returns `None` when
    /// there is nothing to show.
    ///
    /// Call this from your `eframe::App::update` (or equivalent), after forwarding key presses
    /// to the [`crate::KeyboardHub`].
    pub fn ui(&mut self, ctx: &Context) -> Option<egui::Response> {
        self.debug_log.begin_frame();
        if self.is_redraw_pending() {
            self.on_animation_frame();
            ctx.request_repaint();
        }

        let viewport = ctx.screen_rect().size();
        let layout = self.layout(viewport)?;
        let size = layout.preferred_size.unwrap_or(Vec2::ZERO);
        let em = ctx
            .style()
            .text_styles
            .get(&egui::TextStyle::Body)
            .map_or(14.0, |font| font.size);
        let pos = layout.placement.resolve(size, viewport, em);

        let direction = if layout.placement.reverse_expand() {
            egui::Layout::right_to_left(egui::Align::Min)
        } else {
            egui::Layout::left_to_right(egui::Align::Min)
        };

        let area_id = egui::Id::new(("egui_shell_chrome_popup", self.surface_id()));
        let response = egui::Area::new(area_id)
            .order(Order::Foreground)
            .fixed_pos(pos)
            .interactable(true)
            .show(ctx, |ui| {
                if !layout.placement.visible {
                    // Laid out for measurement, invisible until the first size report.
                    ui.set_opacity(0.0);
                }
                egui::Frame::popup(ui.style())
                    .inner_margin(egui::Margin::ZERO)
                    .show(ui, |ui| {
                        ui.with_layout(direction, |ui| {
                            let (_rect, _response) =
                                ui.allocate_exact_size(size, egui::Sense::hover());
                        });
                    });
            })
            .response;

        Some(response)
    }
}
