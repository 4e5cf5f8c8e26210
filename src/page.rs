//! Page controller: the state a rendered page depends on, and the page
//! built around the rendered content.
//!
//! `PageContext` owns the current service and the font scale and is passed
//! explicitly to whoever needs them (the HTML writer, the viewer's font
//! buttons). There is no ambient state.

use url::Url;

use crate::dom::{DomNode, DomTree};
use crate::engine::{PageError, ServiceEngine};
use crate::model::ServiceKey;
use crate::render::{build_sections, RenderedService, CONTENT_ID, LINE_CLASS};

/// Name of the query parameter carrying the service identifier.
pub const SERVICE_PARAM: &str = "service";

/// Shown when the page URL carries no service.
pub const MISSING_SERVICE_NOTICE: &str = "Missing service name in URL.";

/// Shown when any document failed to load. Details go to the log only.
pub const LOAD_ERROR_NOTICE: &str = "Error loading content. See the log for details.";

/// Line size at scale 1.0, in pixels.
pub const BASE_LINE_SIZE_PX: f32 = 24.0;

/// Font-scale multiplier applied by one `A+`/`A-` step.
pub const FONT_STEP: f32 = 1.1;

/// Multiplier for displayed line size. Lives only as long as the page view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontScale(f32);

impl Default for FontScale {
    fn default() -> Self {
        Self(1.0)
    }
}

impl FontScale {
    pub fn new(value: f32) -> Self {
        Self(value)
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// Multiply the current scale, returning the new value.
    pub fn change(&mut self, multiplier: f32) -> f32 {
        self.0 *= multiplier;
        log::info!("Updated font scale to: {}", self.0);
        self.0
    }

    pub fn increase(&mut self) -> f32 {
        self.change(FONT_STEP)
    }

    pub fn decrease(&mut self) -> f32 {
        self.change(1.0 / FONT_STEP)
    }

    /// Line size in pixels at this scale.
    pub fn line_size(self) -> f32 {
        BASE_LINE_SIZE_PX * self.0
    }

    /// The `--font-scale` custom property declaration.
    pub fn css_declaration(self) -> String {
        format!("--font-scale: {}", self.0)
    }
}

/// Result of one page load.
#[derive(Debug, Clone)]
pub enum PageOutcome {
    MissingService,
    Failed(PageError),
    Rendered(RenderedService),
}

impl PageOutcome {
    /// The content container with whatever this outcome displays.
    pub fn content(&self) -> DomNode {
        let children = match self {
            PageOutcome::MissingService => vec![notice(MISSING_SERVICE_NOTICE)],
            PageOutcome::Failed(_) => vec![notice(LOAD_ERROR_NOTICE)],
            PageOutcome::Rendered(service) => build_sections(service),
        };
        DomNode::element("div", children).with_attr("id", CONTENT_ID)
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            PageOutcome::Rendered(service) => Some(&service.title),
            _ => None,
        }
    }
}

fn notice(message: &str) -> DomNode {
    DomNode::element("p", vec![DomNode::text(message)]).with_attr("dir", "ltr")
}

/// Explicit page state shared by the renderer and the font controls.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub service: Option<ServiceKey>,
    pub font_scale: FontScale,
}

impl PageContext {
    pub fn new(service: Option<ServiceKey>) -> Self {
        Self {
            service,
            font_scale: FontScale::default(),
        }
    }

    /// Read the service from a page URL's query string.
    ///
    /// Relative URLs (`service.html?service=x`, `?service=x`) are accepted.
    pub fn from_url(page_url: &str) -> Self {
        let parsed = Url::parse(page_url).or_else(|_| {
            Url::parse("http://localhost/").and_then(|base| base.join(page_url))
        });
        let service = match parsed {
            Ok(url) => url
                .query_pairs()
                .find(|(k, _)| k == SERVICE_PARAM)
                .and_then(|(_, v)| ServiceKey::parse(&v)),
            Err(e) => {
                log::warn!("Unparseable page URL {:?}: {}", page_url, e);
                None
            }
        };
        Self::new(service)
    }

    /// Run the single page load. No document is requested when the
    /// service is missing.
    pub fn load(&self, engine: &ServiceEngine) -> PageOutcome {
        let Some(service) = &self.service else {
            log::warn!("No service identifier; nothing to load");
            return PageOutcome::MissingService;
        };
        match engine.load_service(service) {
            Ok(rendered) => PageOutcome::Rendered(rendered),
            Err(e) => {
                log::error!("Render of {} aborted: {}", service, e);
                PageOutcome::Failed(e)
            }
        }
    }

    /// Build the complete page document for an outcome.
    pub fn document(&self, outcome: &PageOutcome) -> DomTree {
        let title = outcome
            .title()
            .map(str::to_string)
            .or_else(|| self.service.as_ref().map(ServiceKey::to_string))
            .unwrap_or_default();

        let style = format!(
            ":root {{ {}; }}\n\
             .{line} {{ font-size: calc({base}px * var(--font-scale)); }}\n\
             .highlight {{ background-color: #fff176; }}\n",
            self.font_scale.css_declaration(),
            line = LINE_CLASS,
            base = BASE_LINE_SIZE_PX,
        );

        let head = DomNode::element(
            "head",
            vec![
                DomNode::element("meta", Vec::new()).with_attr("charset", "utf-8"),
                DomNode::element("title", vec![DomNode::text(title.as_str())]),
                DomNode::element("style", vec![DomNode::text(style)]),
            ],
        );
        let body = DomNode::element("body", vec![outcome.content()]);
        let root = DomNode::element("html", vec![head, body]).with_attr("lang", "he");

        DomTree { root, title }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::pipeline::tests::MemorySource;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    #[test]
    fn service_comes_from_query_parameter() {
        let ctx = PageContext::from_url("https://example.com/service.html?service=Shacharit&x=1");
        assert_eq!(ctx.service.unwrap().as_str(), "shacharit");

        let relative = PageContext::from_url("service.html?service=mincha");
        assert_eq!(relative.service.unwrap().as_str(), "mincha");

        assert!(PageContext::from_url("https://example.com/service.html").service.is_none());
        assert!(PageContext::from_url("?service=").service.is_none());
    }

    #[test]
    fn missing_service_shows_notice_without_fetching() {
        let source = Arc::new(MemorySource::morning());
        let engine = ServiceEngine::new(source.clone());
        let ctx = PageContext::from_url("https://example.com/service.html");

        let outcome = ctx.load(&engine);
        assert!(matches!(outcome, PageOutcome::MissingService));
        assert_eq!(source.requests.load(Ordering::SeqCst), 0);

        let content = outcome.content();
        assert_eq!(content.attr("id"), Some(CONTENT_ID));
        assert_eq!(content.collect_text(), MISSING_SERVICE_NOTICE);
        assert_eq!(content.children[0].attr("dir"), Some("ltr"));
    }

    #[test]
    fn failed_fetch_shows_generic_notice_and_no_sections() {
        let mut source = MemorySource::morning();
        source.files.remove("data/svc_text.json");
        let engine = ServiceEngine::new(Arc::new(source));

        let outcome = PageContext::from_url("?service=svc").load(&engine);
        assert!(matches!(outcome, PageOutcome::Failed(ref e) if e.phase == "fetch"));

        let content = outcome.content();
        assert_eq!(content.collect_text(), LOAD_ERROR_NOTICE);
        assert!(!content.to_html().contains("<section"));
        assert!(!content.to_html().contains("404"));
    }

    #[test]
    fn rendered_page_sets_title_and_content() {
        let engine = ServiceEngine::new(Arc::new(MemorySource::morning()));
        let ctx = PageContext::from_url("?service=svc");
        let outcome = ctx.load(&engine);

        let page = ctx.document(&outcome);
        assert_eq!(page.title, "Morning");

        let html = page.to_html();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Morning</title>"));
        assert!(html.contains("--font-scale: 1;"));
        assert!(html.contains(
            r#"<p class="hebrew-line" dir="rtl">line <span class="highlight">one</span></p>"#
        ));
        assert!(html.contains(&format!(r#"<div id="{}">"#, CONTENT_ID)));
    }

    #[test]
    fn font_scale_compounds() {
        let mut ctx = PageContext::default();
        ctx.font_scale.increase();
        ctx.font_scale.increase();
        assert!((ctx.font_scale.value() - 1.21).abs() < 1e-5);

        ctx.font_scale.decrease();
        assert!((ctx.font_scale.value() - 1.1).abs() < 1e-5);
        assert!((ctx.font_scale.line_size() - BASE_LINE_SIZE_PX * 1.1).abs() < 1e-3);

        let mut scale = FontScale::new(2.0);
        assert_eq!(scale.change(0.5), 1.0);
        assert_eq!(scale.css_declaration(), "--font-scale: 1");
    }
}
