//! Phrase highlighting for a single line of text.
//!
//! Matching is literal (phrases are escaped before compiling) and not
//! word-boundary aware. All spans are computed against the original line
//! and resolved in a single pass, so a later phrase can never match inside
//! markup inserted for an earlier one.
//!
//! Overlaps between phrases are resolved by: longest match, then the
//! phrase declared first, then the earlier position.

use regex::Regex;

/// CSS class of the highlight marker.
pub const HIGHLIGHT_CLASS: &str = "highlight";

/// A run of a line, either plain or highlighted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Marked(String),
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain(s) | Segment::Marked(s) => s,
        }
    }

    pub fn is_marked(&self) -> bool {
        matches!(self, Segment::Marked(_))
    }
}

#[derive(Debug, Clone, Copy)]
struct Span {
    start: usize,
    end: usize,
    phrase: usize,
}

impl Span {
    fn len(&self) -> usize {
        self.end - self.start
    }

    fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Split `line` into plain and highlighted segments.
///
/// Empty phrases are ignored. With no usable phrase the whole line comes
/// back as one plain segment (or no segment for an empty line).
pub fn highlight_segments(line: &str, phrases: &[&str]) -> Vec<Segment> {
    let spans = resolve_spans(line, phrases);

    let mut segments = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0;
    for span in spans {
        if span.start > cursor {
            segments.push(Segment::Plain(line[cursor..span.start].to_string()));
        }
        segments.push(Segment::Marked(line[span.start..span.end].to_string()));
        cursor = span.end;
    }
    if cursor < line.len() {
        segments.push(Segment::Plain(line[cursor..].to_string()));
    }
    segments
}

/// Wrap every highlighted phrase of `line` in a highlight `<span>`.
///
/// Returns `line` unchanged when `phrases` is empty or nothing matches.
/// The text itself is not escaped.
pub fn apply_highlights(line: &str, phrases: &[&str]) -> String {
    if phrases.is_empty() {
        return line.to_string();
    }
    let mut html = String::with_capacity(line.len());
    for segment in highlight_segments(line, phrases) {
        match segment {
            Segment::Plain(text) => html.push_str(&text),
            Segment::Marked(text) => {
                html.push_str("<span class=\"");
                html.push_str(HIGHLIGHT_CLASS);
                html.push_str("\">");
                html.push_str(&text);
                html.push_str("</span>");
            }
        }
    }
    html
}

/// Accepted, non-overlapping spans ordered by position.
fn resolve_spans(line: &str, phrases: &[&str]) -> Vec<Span> {
    let mut candidates = Vec::new();
    for (idx, phrase) in phrases.iter().enumerate() {
        if phrase.is_empty() {
            continue;
        }
        let re = match Regex::new(&regex::escape(phrase)) {
            Ok(re) => re,
            Err(e) => {
                log::warn!("Skipping unmatchable phrase {:?}: {}", phrase, e);
                continue;
            }
        };
        candidates.extend(re.find_iter(line).map(|m| Span {
            start: m.start(),
            end: m.end(),
            phrase: idx,
        }));
    }

    candidates.sort_by(|a, b| {
        b.len()
            .cmp(&a.len())
            .then(a.phrase.cmp(&b.phrase))
            .then(a.start.cmp(&b.start))
    });

    let mut accepted: Vec<Span> = Vec::with_capacity(candidates.len());
    for span in candidates {
        if !accepted.iter().any(|a| a.overlaps(&span)) {
            accepted.push(span);
        }
    }
    accepted.sort_by_key(|s| s.start);
    accepted
}
