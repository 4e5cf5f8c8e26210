//! Content-area rendering for `ServiceApp`.

use eframe::egui;

use crate::ui::render_dom_node;

use super::ServiceApp;

impl ServiceApp {
    pub fn draw_content(&mut self, ui: &mut egui::Ui) {
        if self.loading {
            // Until every document arrives the page stays blank.
            ui.centered_and_justified(|ui| {
                ui.spinner();
            });
            return;
        }

        let Some(content) = &self.content else {
            return;
        };
        let scale = self.page.font_scale;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if let Some(title) = self.outcome.as_ref().and_then(|o| o.title()) {
                    ui.heading(egui::RichText::new(title).size(28.0).strong());
                    ui.separator();
                }
                render_dom_node(ui, content, scale);
            });
    }
}
