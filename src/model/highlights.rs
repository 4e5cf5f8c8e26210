use std::collections::HashMap;

use serde_json::Value;

use super::{fold_key, DecodeError, ServiceKey};

static EMPTY: HighlightNode = HighlightNode::Empty;

/// A node of a highlight tree.
///
/// Highlight trees mirror the shape of the text tree. Navigation never
/// fails: a missing or mistyped branch resolves to [`HighlightNode::Empty`],
/// which yields no phrases.
#[derive(Debug, Clone, PartialEq)]
pub enum HighlightNode {
    Branch(HashMap<String, HighlightNode>),
    List(Vec<HighlightNode>),
    Phrase(String),
    Empty,
}

impl HighlightNode {
    fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => {
                let mut children = HashMap::with_capacity(map.len());
                for (key, child) in map {
                    let folded = fold_key(&key);
                    if children.contains_key(&folded) {
                        log::warn!("Duplicate highlight branch {:?} (case-folded); keeping first", key);
                        continue;
                    }
                    children.insert(folded, HighlightNode::from_value(child));
                }
                HighlightNode::Branch(children)
            }
            Value::Array(items) => {
                HighlightNode::List(items.into_iter().map(HighlightNode::from_value).collect())
            }
            Value::String(s) => HighlightNode::Phrase(s),
            _ => HighlightNode::Empty,
        }
    }

    /// Child by section or subsection key.
    pub fn key(&self, key: &str) -> &HighlightNode {
        match self {
            HighlightNode::Branch(children) => children.get(&fold_key(key)).unwrap_or(&EMPTY),
            _ => &EMPTY,
        }
    }

    /// Child by position. Branches are addressed by the decimal index,
    /// so `{"0": [...]}` and `[[...]]` are equivalent.
    pub fn index(&self, index: usize) -> &HighlightNode {
        match self {
            HighlightNode::List(items) => items.get(index).unwrap_or(&EMPTY),
            HighlightNode::Branch(children) => children.get(&index.to_string()).unwrap_or(&EMPTY),
            _ => &EMPTY,
        }
    }

    /// Phrases to highlight at this position, in declaration order.
    /// Entries that are not strings are skipped.
    pub fn phrases(&self) -> Vec<&str> {
        match self {
            HighlightNode::List(items) => items
                .iter()
                .filter_map(|item| match item {
                    HighlightNode::Phrase(p) => Some(p.as_str()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// The shared highlight document: one tree per service.
#[derive(Debug, Clone, Default)]
pub struct HighlightDocument {
    services: HashMap<String, HighlightNode>,
}

impl HighlightDocument {
    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_str(json).map_err(|e| DecodeError {
            document: "highlights",
            message: e.to_string(),
        })?;
        let Value::Object(map) = value else {
            return Err(DecodeError {
                document: "highlights",
                message: "top-level value is not an object".into(),
            });
        };

        let mut services = HashMap::with_capacity(map.len());
        for (key, tree) in map {
            let folded = fold_key(&key);
            if services.contains_key(&folded) {
                log::warn!("Duplicate highlight service {:?} (case-folded); keeping first", key);
                continue;
            }
            services.insert(folded, HighlightNode::from_value(tree));
        }
        Ok(Self { services })
    }

    /// Highlight tree of a service, or an empty tree.
    pub fn service(&self, key: &ServiceKey) -> &HighlightNode {
        self.services.get(key.as_str()).unwrap_or(&EMPTY)
    }
}
