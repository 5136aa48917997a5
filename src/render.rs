use crate::launch::LaunchInvoker;
use crate::links::ShortcutEntry;
use crate::theme::{ControlStyle, ThemeAdapter};
use eframe::egui;

pub const EMPTY_PROMPT: &str =
    "To add shortcuts go to the tray icon and select \"Edit Shortcuts\"";

const CONTROL_SIZE: f32 = 72.0;
const CONTROL_SLOT: f32 = 96.0;
const CAPTION_HEIGHT: f32 = 36.0;
const FILLER_HEIGHT: f32 = 14.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlView {
    pub label: String,
    pub caption: String,
    pub link_path: String,
}

/// What the panel shows for one store snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelView {
    Prompt,
    Controls(Vec<ControlView>),
}

impl PanelView {
    pub fn from_entries(entries: &[ShortcutEntry]) -> Self {
        if entries.is_empty() {
            return PanelView::Prompt;
        }
        PanelView::Controls(
            entries
                .iter()
                .map(|e| ControlView {
                    label: e.label(),
                    caption: e.app_name.clone(),
                    link_path: e.link_path.clone(),
                })
                .collect(),
        )
    }

    pub fn controls(&self) -> &[ControlView] {
        match self {
            PanelView::Prompt => &[],
            PanelView::Controls(controls) => controls,
        }
    }

    pub fn shows_prompt(&self) -> bool {
        matches!(self, PanelView::Prompt)
    }
}

/// Draw the panel body. Returns the rectangles of the drawn controls in
/// display order.
pub fn show(
    ui: &mut egui::Ui,
    view: &PanelView,
    theme: &ThemeAdapter,
    launcher: &LaunchInvoker,
) -> Vec<egui::Rect> {
    let rects = match view {
        PanelView::Prompt => {
            show_prompt(ui);
            Vec::new()
        }
        PanelView::Controls(controls) => {
            show_controls(ui, controls, theme.control_style(), launcher)
        }
    };
    show_filler(ui, theme);
    rects
}

fn show_prompt(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(50.0);
        ui.label(egui::RichText::new(EMPTY_PROMPT).heading());
        ui.add_space(80.0);
    });
}

fn show_controls(
    ui: &mut egui::Ui,
    controls: &[ControlView],
    style: ControlStyle,
    launcher: &LaunchInvoker,
) -> Vec<egui::Rect> {
    let mut rects = Vec::with_capacity(controls.len());
    ui.add_space(12.0);
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        let total = controls.len() as f32 * CONTROL_SLOT;
        ui.add_space(((ui.available_width() - total) / 2.0).max(0.0));

        for control in controls {
            ui.allocate_ui_with_layout(
                egui::vec2(CONTROL_SLOT, CONTROL_SIZE + CAPTION_HEIGHT),
                egui::Layout::top_down(egui::Align::Center),
                |ui| {
                    let button = egui::Button::new(
                        egui::RichText::new(control.label.as_str()).size(32.0).strong(),
                    )
                    .min_size(egui::vec2(CONTROL_SIZE, CONTROL_SIZE))
                    .rounding(style.rounding(CONTROL_SIZE));
                    let response = ui.add(button);
                    // clicked() fires on pointer release over the control.
                    if response.clicked() {
                        launcher.launch(&control.link_path);
                        // Keep Space/Enter from re-activating the control.
                        response.surrender_focus();
                    }
                    rects.push(response.rect);
                    ui.add_space(6.0);
                    ui.label(control.caption.as_str());
                },
            );
        }
    });
    ui.add_space(30.0);
    rects
}

fn show_filler(ui: &mut egui::Ui, theme: &ThemeAdapter) {
    let color = theme.theme().filler_color(theme.control_style());
    ui.vertical_centered(|ui| {
        let width = (ui.available_width() - 20.0).max(0.0);
        let (rect, _) = ui.allocate_exact_size(egui::vec2(width, FILLER_HEIGHT), egui::Sense::hover());
        ui.painter().rect_filled(rect, egui::Rounding::same(4.0), color);
    });
}
