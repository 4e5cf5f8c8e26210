use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::DecodeError;

/// A localized title. Entries without text never match a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Title {
    #[serde(default)]
    pub lang: String,
    #[serde(default)]
    pub text: Option<String>,
}

/// One content block of a service, in render order.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaNode {
    pub key: String,
    #[serde(default, deserialize_with = "lenient_titles")]
    pub titles: Vec<Title>,
}

impl SchemaNode {
    /// Section heading: the English title, else the raw key.
    pub fn heading(&self) -> &str {
        find_title(&self.titles, "en").unwrap_or(&self.key)
    }
}

/// Structural schema of a service: localized titles plus ordered nodes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Schema {
    #[serde(default, deserialize_with = "lenient_titles")]
    pub titles: Vec<Title>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nodes: Vec<SchemaNode>,
}

impl Schema {
    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        serde_json::from_str(json).map_err(|e| DecodeError {
            document: "schema",
            message: e.to_string(),
        })
    }

    pub fn title(&self, lang: &str) -> Option<&str> {
        find_title(&self.titles, lang)
    }
}

fn find_title<'a>(titles: &'a [Title], lang: &str) -> Option<&'a str> {
    titles
        .iter()
        .filter(|t| t.lang == lang)
        .find_map(|t| t.text.as_deref())
}

/// Titles are decorative: `null`, a non-list, or malformed entries
/// degrade to "no title" instead of failing the schema.
fn lenient_titles<'de, D>(deserializer: D) -> Result<Vec<Title>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(Value::Array(items)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Title>(item) {
            Ok(title) => Some(title),
            Err(e) => {
                log::debug!("Skipping malformed title: {}", e);
                None
            }
        })
        .collect())
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_titles_and_nodes_in_order() {
        let schema = Schema::from_json(
            r#"{
                "titles": [{"lang": "he", "text": "שחרית"}, {"lang": "en", "text": "Morning"}],
                "nodes": [
                    {"key": "Ashrei", "titles": [{"lang": "en", "text": "Ashrei (Psalm 145)"}]},
                    {"key": "Amidah"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(schema.title("en"), Some("Morning"));
        assert_eq!(schema.title("he"), Some("שחרית"));
        assert_eq!(schema.nodes.len(), 2);
        assert_eq!(schema.nodes[0].heading(), "Ashrei (Psalm 145)");
        assert_eq!(schema.nodes[1].heading(), "Amidah");
    }

    #[test]
    fn missing_lists_decode_empty() {
        let schema = Schema::from_json("{}").unwrap();
        assert!(schema.titles.is_empty());
        assert!(schema.nodes.is_empty());
        assert_eq!(schema.title("en"), None);
    }

    #[test]
    fn null_titles_fall_back_to_key() {
        let schema = Schema::from_json(
            r#"{"titles": null, "nodes": [{"key": "Ashrei", "titles": null}], "extra": 1}"#,
        )
        .unwrap();
        assert_eq!(schema.title("en"), None);
        assert_eq!(schema.nodes[0].heading(), "Ashrei");

        let schema = Schema::from_json(r#"{"nodes": null}"#).unwrap();
        assert!(schema.nodes.is_empty());
    }

    #[test]
    fn titles_without_text_are_skipped() {
        let schema = Schema::from_json(
            r#"{
                "titles": [{"lang": "en"}, {"lang": "en", "text": "Evening"}],
                "nodes": [
                    {"key": "Aleinu", "titles": [{"lang": "en", "text": null}]},
                    {"key": "Kaddish", "titles": ["bogus", {"text": "no lang"}, {"lang": "en", "text": "Kaddish Shalem"}]}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(schema.title("en"), Some("Evening"));
        assert_eq!(schema.nodes[0].heading(), "Aleinu");
        assert_eq!(schema.nodes[1].heading(), "Kaddish Shalem");
    }

    #[test]
    fn invalid_json_is_a_decode_error() {
        let err = Schema::from_json("{ nodes: ").unwrap_err();
        assert_eq!(err.document, "schema");
    }
}
