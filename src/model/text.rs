use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::{fold_key, DecodeError};

/// Content of one schema node.
#[derive(Debug, Clone, PartialEq)]
pub enum TextBlock {
    /// Ordered lines, e.g. Ashrei or Kaddish.
    Flat(Vec<String>),
    /// Subsections in document order (introduction, blessings, ...).
    Grouped(Vec<(String, SubBlock)>),
    /// Any other JSON shape. Renders nothing.
    Unknown,
}

/// Content of one subsection of a [`TextBlock::Grouped`] block.
#[derive(Debug, Clone, PartialEq)]
pub enum SubBlock {
    Lines(Vec<String>),
    /// Two-level block: each group (e.g. one Amidah blessing) is followed
    /// by a divider when rendered.
    Groups(Vec<Vec<String>>),
    Unknown,
}

#[derive(Deserialize)]
struct RawTextDocument {
    #[serde(default)]
    text: Map<String, Value>,
}

/// The liturgical text of a service, keyed by folded section key.
#[derive(Debug, Clone, Default)]
pub struct TextDocument {
    blocks: HashMap<String, TextBlock>,
}

impl TextDocument {
    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        let raw: RawTextDocument = serde_json::from_str(json).map_err(|e| DecodeError {
            document: "text",
            message: e.to_string(),
        })?;
        Ok(Self::from_map(raw.text))
    }

    fn from_map(map: Map<String, Value>) -> Self {
        let mut blocks = HashMap::with_capacity(map.len());
        for (key, value) in map {
            let folded = fold_key(&key);
            if blocks.contains_key(&folded) {
                log::warn!("Duplicate text section {:?} (case-folded); keeping first", key);
                continue;
            }
            blocks.insert(folded, TextBlock::from_value(value));
        }
        Self { blocks }
    }

    /// Look up a section; the key is folded before comparison.
    pub fn block(&self, key: &str) -> Option<&TextBlock> {
        self.blocks.get(&fold_key(key))
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl TextBlock {
    fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => match strings(items) {
                Some(lines) => TextBlock::Flat(lines),
                None => TextBlock::Unknown,
            },
            Value::Object(map) => {
                let mut subs: Vec<(String, SubBlock)> = Vec::with_capacity(map.len());
                for (subkey, sub) in map {
                    let folded = fold_key(&subkey);
                    if subs.iter().any(|(k, _)| *k == folded) {
                        log::warn!("Duplicate subsection {:?} (case-folded); keeping first", subkey);
                        continue;
                    }
                    subs.push((folded, SubBlock::from_value(sub)));
                }
                TextBlock::Grouped(subs)
            }
            _ => TextBlock::Unknown,
        }
    }
}

impl SubBlock {
    fn from_value(value: Value) -> Self {
        let Value::Array(items) = value else {
            return SubBlock::Unknown;
        };
        let first = items.first().map(|v| (v.is_string(), v.is_array()));
        match first {
            None => SubBlock::Lines(Vec::new()),
            Some((true, _)) => strings(items).map_or(SubBlock::Unknown, SubBlock::Lines),
            Some((_, true)) => {
                let mut groups = Vec::with_capacity(items.len());
                for item in items {
                    let Value::Array(group) = item else {
                        return SubBlock::Unknown;
                    };
                    match strings(group) {
                        Some(lines) => groups.push(lines),
                        None => return SubBlock::Unknown,
                    }
                }
                SubBlock::Groups(groups)
            }
            Some(_) => SubBlock::Unknown,
        }
    }
}

/// Collect an array made only of strings.
fn strings(items: Vec<Value>) -> Option<Vec<String>> {
    items
        .into_iter()
        .map(|v| match v {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect()
}
