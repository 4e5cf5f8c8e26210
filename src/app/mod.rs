//! `ServiceApp`: the top-level egui application state.
//!
//! Methods are split across the sibling sub-modules:
//!
//! - `navigation`: page loading and the background fetch
//! - `toolbar`:    service field, font-scale and theme controls
//! - `content`:    rendered service view

pub mod content;
pub mod navigation;
pub mod toolbar;

use std::sync::mpsc;

use siddur_browser::dom::DomNode;
use siddur_browser::page::{PageContext, PageOutcome};

pub struct ServiceApp {
    /// Page URL or site directory the documents are read from.
    pub site: String,
    pub service_input: String,
    pub page: PageContext,
    pub outcome: Option<PageOutcome>,
    /// Content container built from `outcome`.
    pub content: Option<DomNode>,
    pub loading: bool,
    pub fetch_rx: Option<mpsc::Receiver<PageOutcome>>,
    pub dark_mode: bool,
}

impl ServiceApp {
    pub fn new(site: String, service: Option<String>) -> Self {
        let mut page = PageContext::from_url(&site);
        if let Some(raw) = service {
            page.service = siddur_browser::model::ServiceKey::parse(&raw);
        }
        let service_input = page
            .service
            .as_ref()
            .map(|s| s.to_string())
            .unwrap_or_default();

        Self {
            site,
            service_input,
            page,
            outcome: None,
            content: None,
            loading: false,
            fetch_rx: None,
            dark_mode: false,
        }
    }
}
