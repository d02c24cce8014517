use serde::{Deserialize, Serialize};

/// Inputs for a single CQL query.
///
/// Absent identity fields are simply left out of the query. Nothing here
/// requires at least one of them to be set; with both absent and no recency
/// filter the built query is empty, so callers must guard against that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Authority identifier (`scn`) of the person.
    #[serde(default)]
    pub authority_id: Option<String>,
    /// Display name of the person, e.g. `"Creator, Mock"`.
    #[serde(default)]
    pub creator: Option<String>,
    /// Restrict hits to the last 41 publication years.
    #[serde(default)]
    pub recency_filter: bool,
    /// Append a descending sort on publication date.
    #[serde(default)]
    pub sort_descending_by_date: bool,
}

impl SearchCriteria {
    pub fn for_person(authority_id: Option<&str>, creator: Option<&str>) -> Self {
        Self {
            authority_id: authority_id.map(str::to_owned),
            creator: creator.map(str::to_owned),
            ..Self::default()
        }
    }

    pub fn with_recency_filter(self, recency_filter: bool) -> Self {
        Self {
            recency_filter,
            ..self
        }
    }

    pub fn with_sorting(self, sort_descending_by_date: bool) -> Self {
        Self {
            sort_descending_by_date,
            ..self
        }
    }

    /// True when the criteria would produce no search clause at all.
    pub fn is_empty(&self) -> bool {
        self.authority_id.is_none() && self.creator.is_none() && !self.recency_filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chained_flags_leave_identity_untouched() {
        let criteria = SearchCriteria::for_person(Some("42"), None)
            .with_recency_filter(true)
            .with_sorting(true);

        assert_eq!(criteria.authority_id.as_deref(), Some("42"));
        assert_eq!(criteria.creator, None);
        assert!(criteria.recency_filter);
        assert!(criteria.sort_descending_by_date);
    }

    #[test]
    fn default_is_empty() {
        assert!(SearchCriteria::default().is_empty());
        assert!(SearchCriteria::default().with_sorting(true).is_empty());
        assert!(!SearchCriteria::default().with_recency_filter(true).is_empty());
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let criteria: SearchCriteria =
            serde_json::from_str(r#"{"creator":"Creator, Mock"}"#).unwrap();
        assert_eq!(criteria.creator.as_deref(), Some("Creator, Mock"));
        assert!(!criteria.recency_filter);
        assert!(!criteria.sort_descending_by_date);
    }
}
