use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// Strongly typed identifier for catalog entries.
///
/// Ids come out of the source document (either an explicit `id` property or a
/// slug derived from the headline) and are never reassigned once a catalog is
/// built.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Validate and wrap a raw id. Empty or whitespace-only ids are rejected.
    pub fn new(raw: impl Into<String>) -> Result<Self, ModelError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ModelError::InvalidId(
                "entry id cannot be empty".to_string(),
            ));
        }
        Ok(EntryId(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for EntryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets `HashMap<EntryId, _>` be probed with a plain `&str`.
impl std::borrow::Borrow<str> for EntryId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_ids() {
        assert!(EntryId::new("").is_err());
        assert!(EntryId::new("   ").is_err());
        assert!(EntryId::new("der-dritte-mann").is_ok());
    }
}
