//! Rose-and-cream palette for the invitation page.

use eframe::egui;

pub const PAGE_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(255, 240, 245);
pub const CARD_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(255, 250, 252);
pub const TEXT: egui::Color32 = egui::Color32::from_rgb(74, 44, 62);
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(214, 51, 108);
pub const YES_FILL: egui::Color32 = egui::Color32::from_rgb(76, 175, 80);
pub const NO_FILL: egui::Color32 = egui::Color32::from_rgb(239, 83, 80);
pub const YES_CARD: egui::Color32 = egui::Color32::from_rgb(232, 245, 233);
pub const NO_CARD: egui::Color32 = egui::Color32::from_rgb(252, 228, 236);
pub const ROSE: egui::Color32 = egui::Color32::from_rgb(220, 60, 90);
pub const STAR: egui::Color32 = egui::Color32::from_rgb(255, 193, 7);
pub const MUTED: egui::Color32 = egui::Color32::from_rgb(140, 110, 125);

pub fn visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::light();
    visuals.override_text_color = Some(TEXT);
    visuals.panel_fill = PAGE_BACKGROUND;
    visuals.window_fill = CARD_BACKGROUND;
    visuals.window_stroke = egui::Stroke::new(1.0, ACCENT.gamma_multiply(0.4));
    visuals.window_corner_radius = egui::CornerRadius::same(16);
    visuals.selection.bg_fill = ACCENT;
    visuals.widgets.hovered.bg_fill = ACCENT.gamma_multiply(0.85);
    visuals
}

pub fn page_frame() -> egui::Frame {
    egui::Frame::NONE
        .fill(PAGE_BACKGROUND)
        .inner_margin(egui::Margin::symmetric(32, 24))
}

pub fn modal_frame() -> egui::Frame {
    egui::Frame::NONE
        .fill(CARD_BACKGROUND)
        .stroke(egui::Stroke::new(1.0, ACCENT.gamma_multiply(0.5)))
        .corner_radius(egui::CornerRadius::same(16))
        .inner_margin(egui::Margin::symmetric(24, 20))
}

pub fn card_frame(fill: egui::Color32) -> egui::Frame {
    egui::Frame::new()
        .fill(fill)
        .corner_radius(egui::CornerRadius::same(12))
        .inner_margin(egui::Margin::symmetric(20, 16))
}
