pub mod bidi;
pub mod builder;
pub mod tree;

use crate::highlight::Segment;

pub use bidi::visual_segments;
pub use builder::{build_sections, CONTENT_ID, LINE_CLASS};
pub use tree::render_service;

/// Reading direction of a rendered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Headings and titles
    Ltr,
    /// Liturgical text
    Rtl,
}

impl Direction {
    pub fn as_attr(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// One line of liturgical text with its highlight segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub segments: Vec<Segment>,
    pub direction: Direction,
}

impl Line {
    pub fn has_highlights(&self) -> bool {
        self.segments.iter().any(Segment::is_marked)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Line(Line),
    /// Separator emitted after every group of a two-level block.
    Divider,
}

/// A titled block of the service.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub key: String,
    pub heading: String,
    pub heading_direction: Direction,
    pub items: Vec<Item>,
}

impl Section {
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.items.iter().filter_map(|item| match item {
            Item::Line(line) => Some(line),
            Item::Divider => None,
        })
    }

    pub fn divider_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, Item::Divider))
            .count()
    }
}

/// Result of rendering one service.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedService {
    /// English title of the service, or its key.
    pub title: String,
    pub sections: Vec<Section>,
}

impl RenderedService {
    pub fn line_count(&self) -> usize {
        self.sections.iter().map(|s| s.lines().count()).sum()
    }
}
