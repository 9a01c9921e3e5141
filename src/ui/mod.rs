use eframe::egui::{Color32, RichText, Ui};

pub mod explain;
pub mod panels;
pub mod plot;
pub mod simulator;

pub const GOOD: Color32 = Color32::from_rgb(46, 160, 67);
pub const BAD: Color32 = Color32::from_rgb(218, 54, 51);
pub const WARN: Color32 = Color32::from_rgb(210, 153, 34);

/// Headline number with an optional coloured delta underneath.
pub fn metric(ui: &mut Ui, label: &str, value: &str, delta: Option<(String, Color32)>) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).size(26.0).strong());
        if let Some((text, color)) = delta {
            ui.label(RichText::new(text).color(color));
        }
    });
}

pub fn format_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "–".to_string(),
    }
}
