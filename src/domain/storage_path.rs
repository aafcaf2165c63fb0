use std::fmt;

use super::CorrelationId;

/// Key of a staged object, `<correlation id>/<file name>`.
///
/// Each request owns one prefix, so removing a request's objects never reaches another's.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoragePath {
    key: String,
}

impl StoragePath {
    /// Separators in `file_name` are replaced so the key stays one level below the prefix.
    pub fn for_request(correlation_id: &CorrelationId, file_name: &str) -> Self {
        let file_name: String = file_name
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        Self {
            key: format!("{}/{}", correlation_id, file_name),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}
