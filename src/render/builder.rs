//! Turns rendered sections into DOM nodes.
//!
//! ```text
//! <section data-key="ashrei">
//!   <h2 dir="ltr">Ashrei</h2>
//!   <p class="hebrew-line" dir="rtl">... <span class="highlight">...</span></p>
//!   <hr>
//! </section>
//! ```

use crate::dom::DomNode;
use crate::highlight::{Segment, HIGHLIGHT_CLASS};

use super::{Item, Line, RenderedService, Section};

/// `id` of the element that receives the rendered content.
pub const CONTENT_ID: &str = "service-content";

/// CSS class of a line of liturgical text.
pub const LINE_CLASS: &str = "hebrew-line";

/// One `<section>` per rendered section, in order.
pub fn build_sections(service: &RenderedService) -> Vec<DomNode> {
    service.sections.iter().map(build_section).collect()
}

fn build_section(section: &Section) -> DomNode {
    let mut children = Vec::with_capacity(section.items.len() + 1);
    children.push(
        DomNode::element("h2", vec![DomNode::text(section.heading.as_str())])
            .with_attr("dir", section.heading_direction.as_attr()),
    );
    for item in &section.items {
        children.push(match item {
            Item::Line(line) => build_line(line),
            Item::Divider => DomNode::element("hr", Vec::new()),
        });
    }
    DomNode::element("section", children).with_attr("data-key", section.key.as_str())
}

fn build_line(line: &Line) -> DomNode {
    let children = line
        .segments
        .iter()
        .map(|segment| match segment {
            Segment::Plain(text) => DomNode::text(text.as_str()),
            Segment::Marked(text) => DomNode::element("span", vec![DomNode::text(text.as_str())])
                .with_attr("class", HIGHLIGHT_CLASS),
        })
        .collect();
    DomNode::element("p", children)
        .with_attr("class", LINE_CLASS)
        .with_attr("dir", line.direction.as_attr())
}
