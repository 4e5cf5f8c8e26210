//! Navigation methods for `ServiceApp`.
//!
//! A load runs on a background thread and hands its `PageOutcome` back
//! over a channel; `check_fetch` picks it up on the UI thread.

use std::sync::mpsc;

use eframe::egui;

use siddur_browser::engine::{PageError, ServiceEngine};
use siddur_browser::model::ServiceKey;
use siddur_browser::net::open_site;
use siddur_browser::page::{PageContext, PageOutcome};

use super::ServiceApp;

impl ServiceApp {
    /// Start a fresh page load for the service in the toolbar field.
    /// Prior content is cleared first; the font scale is kept.
    pub fn navigate(&mut self, ctx: &egui::Context) {
        if self.loading {
            return;
        }
        self.page.service = ServiceKey::parse(&self.service_input);
        self.outcome = None;
        self.content = None;

        if self.page.service.is_none() {
            self.finish(ctx, PageOutcome::MissingService);
            return;
        }

        self.loading = true;
        let (tx, rx) = mpsc::channel();
        self.fetch_rx = Some(rx);

        let site = self.site.clone();
        let page = PageContext::new(self.page.service.clone());
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let outcome = match open_site(&site) {
                Ok(source) => page.load(&ServiceEngine::from_boxed(source)),
                Err(e) => {
                    log::error!("Cannot open site {}: {}", site, e);
                    PageOutcome::Failed(PageError {
                        message: e.to_string(),
                        phase: "fetch",
                    })
                }
            };
            let _ = tx.send(outcome);
            ctx.request_repaint();
        });
    }

    /// Poll the fetch channel and install the outcome when it arrives.
    pub fn check_fetch(&mut self, ctx: &egui::Context) {
        let Some(rx) = &self.fetch_rx else {
            return;
        };
        if let Ok(outcome) = rx.try_recv() {
            self.loading = false;
            self.fetch_rx = None;
            self.finish(ctx, outcome);
        }
    }

    fn finish(&mut self, ctx: &egui::Context, outcome: PageOutcome) {
        let title = outcome
            .title()
            .map(str::to_string)
            .unwrap_or_else(|| "Siddur Browser".to_string());
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));

        self.content = Some(outcome.content());
        self.outcome = Some(outcome);
    }
}
