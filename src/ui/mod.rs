//! egui widgets for the rendered DOM.
//!
//! Stateless functions that translate the `DomNode` content container
//! into egui widgets.

use eframe::egui;
use egui::text::{LayoutJob, TextFormat};

use siddur_browser::dom::{DomNode, NodeType};
use siddur_browser::highlight::{Segment, HIGHLIGHT_CLASS};
use siddur_browser::page::FontScale;
use siddur_browser::render::{visual_segments, LINE_CLASS};

const HIGHLIGHT_BG: egui::Color32 = egui::Color32::from_rgb(255, 241, 118);

/// Recursively render the content container.
pub fn render_dom_node(ui: &mut egui::Ui, node: &DomNode, scale: FontScale) {
    match node.tag.as_str() {
        "h2" => {
            ui.add_space(12.0);
            ui.heading(egui::RichText::new(node.collect_text()).size(22.0).strong());
            ui.add_space(6.0);
        }
        "p" if node.has_class(LINE_CLASS) => {
            let job = line_job(ui, node, scale);
            ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                ui.label(job);
            });
            ui.add_space(4.0);
        }
        "p" => {
            ui.label(node.collect_text());
        }
        "hr" => {
            ui.separator();
        }
        _ => {
            if node.node_type == NodeType::Text {
                ui.label(node.text.as_str());
                return;
            }
            for child in &node.children {
                render_dom_node(ui, child, scale);
            }
        }
    }
}

/// Lay out one right-to-left line, painting highlight spans.
/// egui places glyphs left to right, so the line is reordered first.
fn line_job(ui: &egui::Ui, line: &DomNode, scale: FontScale) -> LayoutJob {
    let font_id = egui::FontId::proportional(scale.line_size());
    let plain = TextFormat {
        font_id: font_id.clone(),
        color: ui.visuals().text_color(),
        ..Default::default()
    };
    let marked = TextFormat {
        font_id,
        color: egui::Color32::BLACK,
        background: HIGHLIGHT_BG,
        ..Default::default()
    };

    let mut job = LayoutJob::default();
    job.halign = egui::Align::RIGHT;
    job.wrap.max_width = ui.available_width();
    for segment in visual_segments(&line_segments(line)) {
        let format = if segment.is_marked() {
            marked.clone()
        } else {
            plain.clone()
        };
        job.append(segment.text(), 0.0, format);
    }
    job
}

fn line_segments(line: &DomNode) -> Vec<Segment> {
    line.children
        .iter()
        .map(|child| {
            if child.has_class(HIGHLIGHT_CLASS) {
                Segment::Marked(child.collect_text())
            } else {
                Segment::Plain(child.collect_text())
            }
        })
        .collect()
}
