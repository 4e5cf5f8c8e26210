//! Toolbar rendering for `ServiceApp`.
//!
//! Draws the service field, the font-scale buttons and the dark-mode toggle.

use eframe::egui;

use super::ServiceApp;

/// Room reserved right of the service field for the buttons.
const CONTROLS_WIDTH: f32 = 220.0;
const MIN_FIELD_WIDTH: f32 = 80.0;

/// Width of the service field; never negative on narrow windows.
fn service_field_width(available: f32) -> f32 {
    (available - CONTROLS_WIDTH).max(MIN_FIELD_WIDTH)
}

impl ServiceApp {
    /// Render the top toolbar strip.
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            ui.add_space(4.0);
            ui.label("Service:");

            let response = ui.add_sized(
                [service_field_width(ui.available_width()), 24.0],
                egui::TextEdit::singleline(&mut self.service_input)
                    .hint_text("e.g. shacharit")
                    .font(egui::TextStyle::Monospace),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.navigate(ctx);
            }
            if ui.add_enabled(!self.loading, egui::Button::new("Open")).clicked() {
                self.navigate(ctx);
            }

            ui.separator();

            if ui
                .add(egui::Button::new("A-").min_size(egui::vec2(28.0, 24.0)))
                .on_hover_text("Smaller text")
                .clicked()
            {
                self.page.font_scale.decrease();
            }
            ui.label(format!("{:.0}%", self.page.font_scale.value() * 100.0));
            if ui
                .add(egui::Button::new("A+").min_size(egui::vec2(28.0, 24.0)))
                .on_hover_text("Larger text")
                .clicked()
            {
                self.page.font_scale.increase();
            }

            let dark_label = if self.dark_mode { "\u{263E}" } else { "\u{2600}" };
            if ui.button(dark_label).clicked() {
                self.dark_mode = !self.dark_mode;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_field_keeps_minimum_width() {
        assert_eq!(service_field_width(1000.0), 780.0);
        assert_eq!(service_field_width(250.0), MIN_FIELD_WIDTH);
        assert_eq!(service_field_width(0.0), MIN_FIELD_WIDTH);
    }
}
