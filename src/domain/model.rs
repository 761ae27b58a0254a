use serde::{Deserialize, Deserializer, Serialize};

/// A funding opportunity row from the grant catalog.
///
/// Columns other than the four the matcher reads are kept in `extra` so the
/// response echoes the full row back to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grant {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub organization: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Grant {
    pub fn new(title: &str, description: &str, organization: &str, tags: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            organization: organization.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            extra: serde_json::Map::new(),
        }
    }

    /// 小寫的比對字串：title + description + tags
    pub fn haystack(&self) -> String {
        format!(
            "{} {} {}",
            self.title,
            self.description,
            self.tags.join(" ")
        )
        .to_lowercase()
    }

    pub fn summary_line(&self) -> String {
        format!("- {} ({})", self.title, self.organization)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Lower-cased, trimmed, non-empty keywords in extraction order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    /// Splits model output on commas only. `"solar energy"` stays one keyword.
    pub fn parse(text: &str) -> Self {
        Self(
            text.split(',')
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// True when any keyword occurs in the grant's haystack.
    pub fn matches(&self, grant: &Grant) -> bool {
        let haystack = grant.haystack();
        self.0.iter().any(|kw| haystack.contains(kw.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResponse {
    pub message: String,
    pub grants: Vec<Grant>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_parse_normalizes() {
        let keywords = KeywordSet::parse(" Solar,  WOMEN ,energy,, ,\n");
        assert_eq!(keywords.as_slice(), &["solar", "women", "energy"]);
    }

    #[test]
    fn test_keyword_parse_splits_on_commas_only() {
        let keywords = KeywordSet::parse("solar energy; wind\nwomen-led");
        assert_eq!(keywords.len(), 1);
        assert_eq!(keywords.as_slice()[0], "solar energy; wind\nwomen-led");
    }

    #[test]
    fn test_keyword_parse_empty_text() {
        assert!(KeywordSet::parse("").is_empty());
        assert!(KeywordSet::parse(" , ,, ").is_empty());
    }

    #[test]
    fn test_haystack_joins_fields_and_tags() {
        let grant = Grant::new("Solar Grants", "For HER business", "SunFund", &["Solar", "women-led"]);
        assert_eq!(grant.haystack(), "solar grants for her business solar women-led");
    }

    #[test]
    fn test_matches_is_case_insensitive_and_ignores_organization() {
        let grant = Grant::new("Urban Transit Fund", "Buses", "Women in Cities", &["transport"]);
        assert!(KeywordSet::parse("TRANSIT").matches(&grant));
        assert!(KeywordSet::parse("bus").matches(&grant));
        assert!(!KeywordSet::parse("women").matches(&grant));
    }

    #[test]
    fn test_grant_decodes_nulls_and_keeps_extra_columns() {
        let grant: Grant = serde_json::from_value(serde_json::json!({
            "id": 42,
            "title": "Rural Broadband",
            "description": null,
            "organization": "Connect Trust",
            "tags": null,
            "amount": "50000"
        }))
        .unwrap();

        assert_eq!(grant.description, "");
        assert!(grant.tags.is_empty());
        assert_eq!(grant.extra.get("id"), Some(&serde_json::json!(42)));

        let encoded = serde_json::to_value(&grant).unwrap();
        assert_eq!(encoded["amount"], "50000");
        assert_eq!(encoded["title"], "Rural Broadband");
    }
}
