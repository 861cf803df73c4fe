use serde_json::{Map, Value};

use super::website::clean_website;

const DISAMBIGUATION_TITLE: &str = "See results about";
const MIN_UNTITLED_FIELDS: usize = 6;
const BANNED_KEYS: [&str; 3] = ["tabs", "directions", "profiles"];
const BANNED_KEY_PARTS: [&str; 7] = [
    "link",
    "id",
    "map",
    "hours",
    "reviews",
    "people_also_search_for",
    "__",
];

/// Filtered knowledge panel of a search result, keys kept in provider order.
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeProfile {
    fields: Map<String, Value>,
}

impl KnowledgeProfile {
    pub fn from_panel(panel: &Map<String, Value>) -> Self {
        let fields = panel
            .iter()
            .filter(|(key, _)| is_allowed_key(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        KnowledgeProfile { fields }
    }

    pub fn website(&self) -> Option<&str> {
        self.fields.get("website").and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    /// Compact JSON, the form embedded in the prompt.
    pub fn to_json(&self) -> String {
        Value::Object(self.fields.clone()).to_string()
    }
}

fn is_allowed_key(key: &str) -> bool {
    !BANNED_KEYS.contains(&key) && !BANNED_KEY_PARTS.iter().any(|part| key.contains(part))
}

/// Reads the `knowledge_graph` section of a search response.
pub fn extract_knowledge_profile(search_result: &Value) -> Option<KnowledgeProfile> {
    let panel = search_result.get("knowledge_graph")?.as_object()?;

    match panel.get("title") {
        Some(title) if title.as_str() == Some(DISAMBIGUATION_TITLE) => None,
        Some(_) => Some(KnowledgeProfile::from_panel(panel)),
        None => {
            let profile = KnowledgeProfile::from_panel(panel);
            match profile.len() >= MIN_UNTITLED_FIELDS {
                true => Some(profile),
                false => None,
            }
        }
    }
}

/// Fallback query: company name followed by the meaningful parts of its domain.
pub fn rephrase_query(company: &str, website: &str) -> Option<String> {
    let host = clean_website(website)?;
    let host = host.strip_prefix("www").unwrap_or(&host);
    let company_lower = company.to_lowercase();

    let mut query = format!("{} ", company);
    for word in host.split('.') {
        let word_lower = word.to_lowercase();
        if !word_lower.is_empty() && word_lower != "com" && word_lower != company_lower {
            query.push_str(word);
            query.push(' ');
        }
    }

    Some(query)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn banned_keys_are_removed() {
        let result = json!({
            "knowledge_graph": {
                "title": "Acme Corp",
                "type": "Company",
                "website": "https://acme.com",
                "founded": "1992",
                "tabs": [],
                "directions": "x",
                "profiles": [],
                "kgmid": "/m/123",
                "knowledge_graph_search_link": "https://google.com",
                "local_map": {},
                "hours": {},
                "user_reviews": [],
                "people_also_search_for": [],
                "headquarters__link": "x"
            }
        });

        let profile = extract_knowledge_profile(&result).unwrap();
        let keys: Vec<&String> = profile.keys().collect();

        assert_eq!(keys, vec!["title", "type", "website", "founded"]);
        for key in profile.keys() {
            assert!(BANNED_KEY_PARTS.iter().all(|part| !key.contains(part)));
            assert!(!BANNED_KEYS.contains(&key.as_str()));
        }
    }

    #[test]
    fn disambiguation_title_is_absent() {
        let result = json!({
            "knowledge_graph": {
                "title": "See results about",
                "a": 1, "b": 2, "c": 3, "d": 4, "e": 5, "f": 6, "g": 7
            }
        });

        assert_eq!(extract_knowledge_profile(&result), None);
    }

    #[test]
    fn missing_panel_is_absent() {
        assert_eq!(extract_knowledge_profile(&json!({"organic_results": []})), None);
        assert_eq!(extract_knowledge_profile(&json!({"knowledge_graph": "x"})), None);
    }

    #[test]
    fn untitled_panel_needs_six_fields() {
        let five = json!({
            "knowledge_graph": {"a": 1, "b": 2, "c": 3, "d": 4, "e": 5, "tabs": []}
        });
        assert_eq!(extract_knowledge_profile(&five), None);

        let six = json!({
            "knowledge_graph": {"a": 1, "b": 2, "c": 3, "d": 4, "e": 5, "f": 6}
        });
        assert_eq!(extract_knowledge_profile(&six).map(|p| p.len()), Some(6));
    }

    #[test]
    fn website_is_read_as_string_only() {
        let profile = extract_knowledge_profile(&json!({
            "knowledge_graph": {"title": "Acme", "website": 42}
        }))
        .unwrap();

        assert_eq!(profile.website(), None);
    }

    #[test]
    fn profile_json_keeps_order() {
        let profile = extract_knowledge_profile(&json!({
            "knowledge_graph": {"title": "Acme", "website": "acme.com", "founded": "1992"}
        }))
        .unwrap();

        assert_eq!(
            profile.to_json(),
            r#"{"title":"Acme","website":"acme.com","founded":"1992"}"#
        );
    }

    #[test]
    fn rephrase_query_drops_com_company_and_www() {
        assert_eq!(
            rephrase_query("Acme Corp", "acme.com"),
            Some("Acme Corp acme ".to_string())
        );
        assert_eq!(
            rephrase_query("acme", "https://www.Acme.co.uk/about"),
            Some("acme co uk ".to_string())
        );
        assert_eq!(rephrase_query("Acme", ""), None);
    }

    #[test]
    fn rephrase_query_only_strips_leading_www() {
        assert_eq!(
            rephrase_query("Acme", "awwwards.com"),
            Some("Acme awwwards ".to_string())
        );
        assert_eq!(
            rephrase_query("Acme", "www.shopwww.com"),
            Some("Acme shopwww ".to_string())
        );
    }
}
