use std::sync::Arc;

use crate::model::{HighlightDocument, Schema, ServiceKey, TextDocument, HIGHLIGHTS_PATH};
use crate::net::fetch::{DocumentSource, FetchError};
use crate::render::{render_service, RenderedService};

/// Error during service loading
#[derive(Debug, Clone)]
pub struct PageError {
    pub message: String,
    pub phase: &'static str,
}

impl std::fmt::Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.phase, self.message)
    }
}

/// Raw bodies of the three documents a service needs.
pub struct ServiceDocuments {
    pub schema: String,
    pub text: String,
    pub highlights: String,
}

/// The service pipeline: Fetch (×3, joined) → Decode → Render
pub struct ServiceEngine {
    source: Arc<dyn DocumentSource>,
}

impl ServiceEngine {
    pub fn new(source: Arc<dyn DocumentSource>) -> Self {
        Self { source }
    }

    pub fn from_boxed(source: Box<dyn DocumentSource>) -> Self {
        Self::new(Arc::from(source))
    }

    /// Load and render a service through the full pipeline.
    pub fn load_service(&self, service: &ServiceKey) -> Result<RenderedService, PageError> {
        let docs = self.fetch_documents(service)?;
        self.process_documents(&docs, service)
    }

    /// Issue the three retrievals concurrently and wait for all of them.
    /// Any failure aborts the whole load.
    pub fn fetch_documents(&self, service: &ServiceKey) -> Result<ServiceDocuments, PageError> {
        let schema_path = service.schema_path();
        let text_path = service.text_path();
        let source = self.source.as_ref();

        log::info!("Loading service {} from {}", service, source.describe());

        let (schema, (text, highlights)) = rayon::join(
            || source.fetch(&schema_path),
            || {
                rayon::join(
                    || source.fetch(&text_path),
                    || source.fetch(HIGHLIGHTS_PATH),
                )
            },
        );

        Ok(ServiceDocuments {
            schema: fetched(&schema_path, schema)?,
            text: fetched(&text_path, text)?,
            highlights: fetched(HIGHLIGHTS_PATH, highlights)?,
        })
    }

    /// Decode fetched bodies and render them (for testing)
    pub fn process_documents(
        &self,
        docs: &ServiceDocuments,
        service: &ServiceKey,
    ) -> Result<RenderedService, PageError> {
        let schema = Schema::from_json(&docs.schema).map_err(decode_error)?;
        let text = TextDocument::from_json(&docs.text).map_err(decode_error)?;
        let highlights = HighlightDocument::from_json(&docs.highlights).map_err(decode_error)?;

        let rendered = render_service(&schema, &text, &highlights, service);
        let highlighted: usize = rendered
            .sections
            .iter()
            .map(|s| s.lines().filter(|l| l.has_highlights()).count())
            .sum();
        let dividers: usize = rendered.sections.iter().map(|s| s.divider_count()).sum();
        log::debug!(
            "Rendered {}: {} sections, {} lines ({} highlighted), {} dividers",
            service,
            rendered.sections.len(),
            rendered.line_count(),
            highlighted,
            dividers
        );
        Ok(rendered)
    }
}

fn fetched(path: &str, result: Result<String, FetchError>) -> Result<String, PageError> {
    result.map_err(|e| {
        log::error!("Failed to load {}: {}", path, e);
        PageError {
            message: format!("{}: {}", path, e),
            phase: "fetch",
        }
    })
}

fn decode_error(e: crate::model::DecodeError) -> PageError {
    log::error!("Failed to decode {}", e);
    PageError {
        message: e.to_string(),
        phase: "decode",
    }
}
