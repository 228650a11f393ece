#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::collections::VecDeque;

use eframe::egui;
use egui_shell_chrome::{
    CommandBus, DragTabPayload, EmbeddedSurface, InsertSide, KeyboardHub, PopupDetail,
    PopupSurfaceController, PopupWindowOptions, ShellCommand, SurfaceError, SurfaceEvent,
    SurfaceId, TabFrame, TabId, TabKey, TabPageDropZone, TabPageFrames, TabPageProps, TabPages,
    WindowId, apply_page_hover,
};

const TABS_PER_PAGE: usize = 4;
const WINDOW: WindowId = WindowId(1);

/// Stand-in for a native webview: reports a size derived from its url and plays back the
/// lifecycle a real surface would go through, one event per frame.
struct DemoSurface {
    id: SurfaceId,
    src: String,
    visible: bool,
    size: egui::Vec2,
    pending_events: VecDeque<SurfaceEvent>,
}

impl DemoSurface {
    fn new(id: SurfaceId) -> Self {
        Self {
            id,
            src: String::new(),
            visible: true,
            size: egui::Vec2::ZERO,
            pending_events: [
                SurfaceEvent::DidAttach,
                SurfaceEvent::LoadStart,
                SurfaceEvent::DidFinishLoad,
                SurfaceEvent::PreferredSizeChanged,
            ]
            .into_iter()
            .collect(),
        }
    }
}

impl EmbeddedSurface for DemoSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn set_src(&mut self, src: &str) {
        self.src = src.to_owned();
    }

    fn set_name(&mut self, _name: &str) {}

    fn set_preferred_size_reporting(&mut self, _enabled: bool) {}

    fn preferred_size(&self) -> Result<egui::Vec2, SurfaceError> {
        let width = 160.0 + 4.0 * self.src.len() as f32;
        Ok(egui::vec2(width.min(420.0), 180.0))
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_size(&mut self, size: egui::Vec2) {
        self.size = size;
    }

    fn is_attached(&self) -> bool {
        true
    }
}

struct App {
    bus: CommandBus,
    keyboard: KeyboardHub,
    popup: Option<PopupSurfaceController<DemoSurface>>,
    next_surface_id: u64,
    tabs: Vec<TabFrame>,
    page_index: usize,
    hovered_page: Option<usize>,
    log_lines: Vec<String>,
}

impl Default for App {
    fn default() -> Self {
        let tabs = (0..11)
            .map(|n| {
                TabFrame::new(TabKey(n), TabId(100 + n))
                    .pinned(n < 2)
                    .with_audio(n == 6, false)
            })
            .collect();
        Self {
            bus: CommandBus::new(),
            keyboard: KeyboardHub::new(),
            popup: None,
            next_surface_id: 1,
            tabs,
            page_index: 0,
            hovered_page: None,
            log_lines: Vec::new(),
        }
    }
}

impl App {
    fn open_popup(&mut self, src: &str, anchor: egui::Pos2) {
        if let Some(previous) = self.popup.take() {
            previous.unmount();
        }
        let id = SurfaceId(self.next_surface_id);
        self.next_surface_id += 1;
        let options = PopupWindowOptions {
            debug_event_log: true,
            ..Default::default()
        };
        self.popup = Some(PopupSurfaceController::mount(
            PopupDetail::anchored(src, anchor.x as i32, anchor.y as i32),
            || DemoSurface::new(id),
            &self.keyboard,
            self.bus.clone(),
            options,
        ));
    }

    fn pump_surface_events(&mut self) {
        let Some(popup) = self.popup.as_mut() else {
            return;
        };
        let Some((id, event)) = popup
            .surface_mut()
            .and_then(|surface| Some((surface.id, surface.pending_events.pop_front()?)))
        else {
            return;
        };
        popup.handle_event(id, event);
    }

    fn apply_commands(&mut self) {
        for command in self.bus.drain() {
            self.log_lines.push(format!("{command:?}"));
            match command {
                ShellCommand::ClearPopupDetail => {
                    if let Some(popup) = self.popup.take() {
                        popup.unmount();
                    }
                }
                ShellCommand::UpdatePopupDetail(detail) => {
                    if let Some(popup) = self.popup.as_mut() {
                        popup.update_detail(detail);
                    }
                }
                ShellCommand::SetTabPageHover {
                    page_index,
                    hovered,
                } => {
                    self.hovered_page = apply_page_hover(self.hovered_page, page_index, hovered);
                }
                ShellCommand::SetTabPageIndex { page_index } => self.page_index = page_index,
                ShellCommand::MoveTab { key, anchor, side } => self.move_tab(key, anchor, side),
                ShellCommand::SetTabPinned { tab_id, pinned } => {
                    if let Some(tab) = self.tabs.iter_mut().find(|tab| tab.tab_id == tab_id) {
                        tab.pinned = pinned;
                    }
                }
                ShellCommand::DataDropped { .. } => {}
            }
        }
    }

    fn move_tab(&mut self, key: TabKey, anchor: TabKey, side: InsertSide) {
        if key == anchor {
            return;
        }
        let Some(from) = self.tabs.iter().position(|tab| tab.key == key) else {
            return;
        };
        let tab = self.tabs.remove(from);
        let Some(to) = self.tabs.iter().position(|tab| tab.key == anchor) else {
            self.tabs.insert(from, tab);
            return;
        };
        let to = if side.is_after() { to + 1 } else { to };
        self.tabs.insert(to, tab);
    }

    fn tab_strip_ui(&mut self, ui: &mut egui::Ui) {
        let pages = TabPages::paginate(self.tabs.iter().copied(), TABS_PER_PAGE);
        let page_index = self.page_index.min(pages.page_count().saturating_sub(1));

        let drag_origin = egui::DragAndDrop::payload::<DragTabPayload>(ui.ctx())
            .and_then(|payload| pages.drag_origin_of(payload.key));

        ui.horizontal(|ui| {
            for frame in pages.pinned() {
                tab_ui(ui, frame, true);
            }
            ui.separator();
            if let Some(page) = pages.page(page_index) {
                for frame in page {
                    tab_ui(ui, frame, false);
                }
            }
        });

        ui.horizontal(|ui| {
            let mut menu = |frames: &TabPageFrames| {
                log::info!("context menu for a page with {} tabs", frames.len());
            };
            for (index, frames) in pages.pages() {
                let zone = TabPageDropZone::new(TabPageProps {
                    index,
                    frames,
                    drag_origin,
                    preview_on_hover: true,
                    active: index == page_index,
                    window_id: WINDOW,
                });
                zone.ui(ui, self.hovered_page == Some(index), &self.bus, &mut menu);
            }
        });
    }
}

fn tab_ui(ui: &mut egui::Ui, frame: &TabFrame, pinned: bool) {
    let label = if pinned {
        format!("pinned {}", frame.key)
    } else {
        frame.key.to_string()
    };
    let id = egui::Id::new(("demo_tab", frame.key));
    ui.dnd_drag_source(id, DragTabPayload::for_frame(frame), |ui| {
        ui.add(egui::Button::new(label).sense(egui::Sense::hover()));
    });
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Whatever was deferred last frame runs now, before this frame's input.
        self.bus.next_tick();
        self.apply_commands();

        self.keyboard.forward_key_presses(ctx);
        self.pump_surface_events();

        egui::TopBottomPanel::top("shell_chrome_demo_tabs").show(ctx, |ui| {
            self.tab_strip_ui(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                for src in [
                    "chrome-extension://short/popup.html",
                    "chrome-extension://a-much-longer-extension-id/popup.html",
                ] {
                    let response = ui.button(src);
                    if response.clicked() {
                        self.open_popup(src, response.rect.left_bottom());
                    }
                }
            });
            ui.label("Escape closes the popup. Drag tabs onto the page indicators to move them.");
            ui.separator();
            if let Some(popup) = &self.popup {
                if let Some(surface) = popup.surface() {
                    ui.label(format!(
                        "surface {:?}: visible={} size={:?} phase={:?}",
                        surface.id,
                        surface.visible,
                        surface.size,
                        popup.phase()
                    ));
                }
                ui.monospace(popup.debug_log_text());
            }
            ui.separator();
            egui::ScrollArea::vertical().show(ui, |ui| {
                for line in self.log_lines.iter().rev().take(20) {
                    ui.monospace(line);
                }
            });
        });

        if let Some(popup) = self.popup.as_mut() {
            popup.ui(ctx);
            if popup.surface().is_some_and(|surface| !surface.pending_events.is_empty()) {
                ctx.request_repaint();
            }
        }

        self.apply_commands();
        if self.bus.deferred_len() > 0 {
            ctx.request_repaint();
        }
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_title("egui_shell_chrome demo"),
        ..Default::default()
    };

    eframe::run_native(
        "egui_shell_chrome demo",
        options,
        Box::new(|_cc| Ok(Box::new(App::default()))),
    )
}
