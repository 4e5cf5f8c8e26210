use crate::highlight::highlight_segments;
use crate::model::{
    HighlightDocument, HighlightNode, Schema, ServiceKey, SubBlock, TextBlock, TextDocument,
};

use super::{Direction, Item, Line, RenderedService, Section};

/// Walk the schema in order and emit one section per node.
///
/// Never fails: missing text yields a heading-only section, missing or
/// malformed highlight branches yield unhighlighted lines, and unknown
/// block shapes are skipped.
pub fn render_service(
    schema: &Schema,
    text: &TextDocument,
    highlights: &HighlightDocument,
    service: &ServiceKey,
) -> RenderedService {
    let title = schema
        .title("en")
        .map(str::to_string)
        .unwrap_or_else(|| service.to_string());
    let service_hl = highlights.service(service);

    let sections = schema
        .nodes
        .iter()
        .map(|node| {
            let mut items = Vec::new();
            let section_hl = service_hl.key(&node.key);
            match text.block(&node.key) {
                Some(block) => render_block(&node.key, block, section_hl, &mut items),
                None => log::debug!("No text for section {:?}", node.key),
            }
            Section {
                key: node.key.clone(),
                heading: node.heading().to_string(),
                heading_direction: Direction::Ltr,
                items,
            }
        })
        .collect();

    RenderedService { title, sections }
}

fn render_block(key: &str, block: &TextBlock, hl: &HighlightNode, items: &mut Vec<Item>) {
    match block {
        TextBlock::Flat(lines) => push_lines(lines, hl, items),
        TextBlock::Grouped(subs) => {
            for (subkey, sub) in subs {
                let sub_hl = hl.key(subkey);
                match sub {
                    SubBlock::Lines(lines) => push_lines(lines, sub_hl, items),
                    SubBlock::Groups(groups) => {
                        for (gi, group) in groups.iter().enumerate() {
                            push_lines(group, sub_hl.index(gi), items);
                            items.push(Item::Divider);
                        }
                    }
                    SubBlock::Unknown => {
                        log::debug!("Skipping subsection {:?}/{:?}: unknown shape", key, subkey)
                    }
                }
            }
        }
        TextBlock::Unknown => log::debug!("Skipping section {:?}: unknown shape", key),
    }
}

/// One line per entry, each highlighted with the branch entry at its index.
fn push_lines(lines: &[String], hl: &HighlightNode, items: &mut Vec<Item>) {
    for (idx, text) in lines.iter().enumerate() {
        let phrases = hl.index(idx).phrases();
        items.push(Item::Line(Line {
            segments: highlight_segments(text, &phrases),
            text: text.clone(),
            direction: Direction::Rtl,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::Segment;

    fn render(schema: &str, text: &str, highlights: &str, service: &str) -> RenderedService {
        render_service(
            &Schema::from_json(schema).unwrap(),
            &TextDocument::from_json(text).unwrap(),
            &HighlightDocument::from_json(highlights).unwrap(),
            &ServiceKey::parse(service).unwrap(),
        )
    }

    fn line_texts(section: &Section) -> Vec<&str> {
        section
            .items
            .iter()
            .map(|item| match item {
                Item::Line(line) => line.text.as_str(),
                Item::Divider => "---",
            })
            .collect()
    }

    const MORNING: &str = r#"{"titles": [{"lang": "en", "text": "Morning"}], "nodes": [{"key": "Ashrei"}]}"#;
    const ASHREI: &str = r#"{"text": {"Ashrei": ["line one", "line two"]}}"#;

    #[test]
    fn flat_block_emits_lines_in_order() {
        let out = render(MORNING, ASHREI, "{}", "svc");

        assert_eq!(out.title, "Morning");
        assert_eq!(out.sections.len(), 1);
        let section = &out.sections[0];
        assert_eq!(section.heading, "Ashrei");
        assert_eq!(section.heading_direction, Direction::Ltr);
        assert_eq!(line_texts(section), ["line one", "line two"]);
        assert_eq!(section.divider_count(), 0);
        assert!(section.lines().all(|l| l.direction == Direction::Rtl && !l.has_highlights()));
    }

    #[test]
    fn flat_block_applies_positional_highlights() {
        let out = render(MORNING, ASHREI, r#"{"svc": {"Ashrei": {"0": ["one"]}}}"#, "svc");
        let lines: Vec<&Line> = out.sections[0].lines().collect();

        assert_eq!(
            lines[0].segments,
            vec![Segment::Plain("line ".into()), Segment::Marked("one".into())]
        );
        assert!(!lines[1].has_highlights());
    }

    #[test]
    fn groups_are_each_followed_by_a_divider() {
        let out = render(
            r#"{"nodes": [{"key": "amidah", "titles": [{"lang": "en", "text": "Amidah"}]}]}"#,
            r#"{"text": {"amidah": {"blessings": [["a", "b"], ["c"]]}}}"#,
            "{}",
            "svc",
        );
        let section = &out.sections[0];

        assert_eq!(section.heading, "Amidah");
        assert_eq!(line_texts(section), ["a", "b", "---", "c", "---"]);
        assert_eq!(section.lines().count(), 3);
        assert_eq!(section.divider_count(), 2);
    }

    #[test]
    fn grouped_subsections_follow_document_order_with_highlights() {
        let out = render(
            r#"{"nodes": [{"key": "Amidah"}]}"#,
            r#"{"text": {"amidah": {
                "introduction": ["open lips"],
                "blessings": [["first blessing"], ["second blessing"]],
                "conclusion": ["close"]
            }}}"#,
            r#"{"svc": {"amidah": {
                "introduction": [["lips"]],
                "blessings": [[], [["second"]]]
            }}}"#,
            "svc",
        );
        let section = &out.sections[0];
        assert_eq!(
            line_texts(section),
            ["open lips", "first blessing", "---", "second blessing", "---", "close"]
        );

        let marked: Vec<Vec<&str>> = section
            .lines()
            .map(|l| {
                l.segments
                    .iter()
                    .filter(|s| s.is_marked())
                    .map(Segment::text)
                    .collect()
            })
            .collect();
        assert_eq!(
            marked,
            vec![vec!["lips"], vec![], vec!["second"], vec![]]
        );
    }

    #[test]
    fn missing_text_yields_heading_only_section() {
        let out = render(
            r#"{"nodes": [{"key": "Ashrei"}, {"key": "Aleinu", "titles": [{"lang": "en", "text": "Aleinu"}]}]}"#,
            ASHREI,
            "{}",
            "svc",
        );
        assert_eq!(out.title, "svc");
        assert_eq!(out.sections.len(), 2);
        assert_eq!(out.sections[1].heading, "Aleinu");
        assert!(out.sections[1].items.is_empty());
    }

    #[test]
    fn unknown_shapes_are_skipped() {
        let out = render(
            r#"{"nodes": [{"key": "odd"}, {"key": "mixed"}]}"#,
            r#"{"text": {"odd": 7, "mixed": {"bad": {"x": 1}, "good": ["kept"]}}}"#,
            "{}",
            "svc",
        );
        assert!(out.sections[0].items.is_empty());
        assert_eq!(line_texts(&out.sections[1]), ["kept"]);
    }

    #[test]
    fn malformed_highlight_branch_degrades_to_plain() {
        let out = render(
            MORNING,
            ASHREI,
            r#"{"svc": {"ashrei": "not a tree"}, "other": {"ashrei": [["line"]]}}"#,
            "svc",
        );
        assert_eq!(out.line_count(), 2);
        assert!(out.sections[0].lines().all(|l| !l.has_highlights()));
    }

    #[test]
    fn mixed_case_keys_resolve_uniformly() {
        let out = render(
            r#"{"nodes": [{"key": "ASHREI"}]}"#,
            ASHREI,
            r#"{"SVC": {"AshreI": [["two"], ["two"]]}}"#,
            "Svc",
        );
        let lines: Vec<&Line> = out.sections[0].lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(!lines[0].has_highlights());
        assert!(lines[1].has_highlights());
    }
}
