//! Visual reordering of right-to-left lines.
//!
//! The DOM and HTML keep text in logical order and let the browser run the
//! bidi algorithm. The native viewer lays text out strictly left to right,
//! so lines are reordered here first.

use std::ops::Range;

use unicode_bidi::{bidi_class, BidiClass, BidiInfo, Level};

use crate::highlight::Segment;

/// Reorder the segments of a right-to-left line into visual order.
///
/// Left-to-right runs inside the line (Latin words, numbers) keep their
/// internal order. Combining marks such as niqqud stay attached to their
/// base letter. Adjacent pieces with the same marking are merged, so
/// highlights survive as whole segments.
pub fn visual_segments(segments: &[Segment]) -> Vec<Segment> {
    let mut text = String::new();
    let mut bounds = Vec::with_capacity(segments.len());
    for segment in segments {
        text.push_str(segment.text());
        bounds.push((text.len(), segment.is_marked()));
    }
    let marked_at = |pos: usize| {
        bounds
            .iter()
            .find(|(end, _)| pos < *end)
            .is_some_and(|(_, marked)| *marked)
    };

    let bidi = BidiInfo::new(&text, Some(Level::rtl()));
    let mut out: Vec<Segment> = Vec::new();
    for para in &bidi.paragraphs {
        let (levels, runs) = bidi.visual_runs(para, para.range.clone());
        for run in runs {
            let rtl = levels[run.start].is_rtl();
            let mut pieces = clusters(&text, run);
            if rtl {
                pieces.reverse();
            }
            for piece in pieces {
                let chunk: String = if rtl {
                    text[piece.clone()].chars().map(mirror).collect()
                } else {
                    text[piece.clone()].to_string()
                };
                push_merged(&mut out, chunk, marked_at(piece.start));
            }
        }
    }
    out
}

/// Split `range` of `text` into base characters with their trailing
/// non-spacing marks.
fn clusters(text: &str, range: Range<usize>) -> Vec<Range<usize>> {
    let mut out: Vec<Range<usize>> = Vec::new();
    for (offset, ch) in text[range.clone()].char_indices() {
        let start = range.start + offset;
        let end = start + ch.len_utf8();
        match out.last_mut() {
            Some(last) if bidi_class(ch) == BidiClass::NSM => last.end = end,
            _ => out.push(start..end),
        }
    }
    out
}

fn push_merged(out: &mut Vec<Segment>, chunk: String, marked: bool) {
    match out.last_mut() {
        Some(Segment::Marked(s)) if marked => s.push_str(&chunk),
        Some(Segment::Plain(s)) if !marked => s.push_str(&chunk),
        _ if marked => out.push(Segment::Marked(chunk)),
        _ => out.push(Segment::Plain(chunk)),
    }
}

/// Paired punctuation drawn mirrored inside right-to-left runs.
fn mirror(ch: char) -> char {
    match ch {
        '(' => ')',
        ')' => '(',
        '[' => ']',
        ']' => '[',
        '{' => '}',
        '}' => '{',
        '<' => '>',
        '>' => '<',
        _ => ch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(s: &str) -> Segment {
        Segment::Plain(s.into())
    }

    fn marked(s: &str) -> Segment {
        Segment::Marked(s.into())
    }

    #[test]
    fn hebrew_is_reversed() {
        assert_eq!(visual_segments(&[plain("אב")]), [plain("בא")]);
    }

    #[test]
    fn niqqud_stays_with_its_letter() {
        // alef + patah, bet
        assert_eq!(visual_segments(&[plain("א\u{05B7}ב")]), [plain("בא\u{05B7}")]);
    }

    #[test]
    fn highlights_move_with_their_text() {
        let visual = visual_segments(&[plain("אב "), marked("גד")]);
        assert_eq!(visual, [marked("דג"), plain(" בא")]);
    }

    #[test]
    fn latin_and_numbers_keep_their_order() {
        assert_eq!(visual_segments(&[plain("אב abc")]), [plain("abc בא")]);
        assert_eq!(visual_segments(&[plain("אב 145")]), [plain("145 בא")]);
    }

    #[test]
    fn brackets_are_mirrored() {
        assert_eq!(visual_segments(&[plain("(א)")]), [plain("(א)")]);
    }

    #[test]
    fn empty_line_has_no_segments() {
        assert!(visual_segments(&[]).is_empty());
        assert!(visual_segments(&[plain("")]).is_empty());
    }
}
