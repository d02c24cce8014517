use serde::{Deserialize, Serialize};

/// Fields of interest pulled from a bibliographic record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlmaRecord {
    pub title: String,
}

impl AlmaRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_title_object() {
        let json = serde_json::to_string(&AlmaRecord::new("Example Title")).unwrap();
        assert_eq!(json, r#"{"title":"Example Title"}"#);
    }
}
