//! Membership records and the cached dataset

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use zyntiq_errors::{Error, NetworkError};

/// One verifiable membership entry from the remote dataset.
///
/// The remote sheet is not owned by this system, so every field is optional
/// and unknown columns are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Registration date as `D/M/YYYY` or `DD/MM/YYYY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Record {
    /// Create a record with an identifier and a name
    #[must_use]
    pub fn new(uid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uid: Some(uid.into()),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Unique identifier, `None` when missing or empty
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        non_empty(self.uid.as_deref())
    }

    /// Full name, `None` when missing or empty
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        non_empty(self.name.as_deref())
    }

    /// Email address, `None` when missing or empty
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        non_empty(self.email.as_deref())
    }

    /// Raw registration date, `None` when missing or empty
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        non_empty(self.date.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// The full in-memory collection of records cached for a session.
///
/// Cloning is cheap; clones share the same backing records. A dataset is
/// never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Arc<Vec<Record>>,
}

impl Dataset {
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    /// Parse a dataset from a JSON array body
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::InvalidBody` if the body is not a JSON array of
    /// objects.
    pub fn from_json(body: &str) -> Result<Self, Error> {
        let records: Vec<Record> =
            serde_json::from_str(body).map_err(|e| NetworkError::InvalidBody {
                message: e.to_string(),
            })?;
        Ok(Self::new(records))
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_from_json() {
        let body = r#"[
            {"uid": "ZYNTIQ-75050", "name": "Jane Doe", "email": "jane@example.com", "date": "5/3/2024"},
            {"uid": "ZYNTIQ-10001", "name": "John Roe", "extra": "ignored"},
            {"name": "No Id"}
        ]"#;

        let dataset = Dataset::from_json(body).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.records()[0].uid(), Some("ZYNTIQ-75050"));
        assert_eq!(dataset.records()[1].email(), None);
        assert_eq!(dataset.records()[2].uid(), None);
    }

    #[test]
    fn test_dataset_rejects_non_array() {
        let err = Dataset::from_json(r#"{"error": "not found"}"#).unwrap_err();
        assert!(matches!(
            err,
            Error::Network(NetworkError::InvalidBody { .. })
        ));
    }

    #[test]
    fn test_empty_fields_read_as_missing() {
        let record = Record {
            uid: Some(String::new()),
            name: Some("Jane".into()),
            email: Some(String::new()),
            date: None,
        };
        assert_eq!(record.uid(), None);
        assert_eq!(record.name(), Some("Jane"));
        assert_eq!(record.email(), None);
    }

    #[test]
    fn test_clones_share_records() {
        let dataset = Dataset::new(vec![Record::new("A-1", "A")]);
        let clone = dataset.clone();
        assert!(std::ptr::eq(dataset.records(), clone.records()));
    }
}
