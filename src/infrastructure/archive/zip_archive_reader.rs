use std::io::{Cursor, Read};

use zip::ZipArchive;

use crate::application::ports::{ArchiveError, ArchiveReader};

/// Reads GitHub Actions artifacts, which are always delivered as zip files.
pub struct ZipArchiveReader;

impl ArchiveReader for ZipArchiveReader {
    fn read_entry_with_suffix(
        &self,
        archive: &[u8],
        suffix: &str,
    ) -> Result<Vec<u8>, ArchiveError> {
        let mut zip = ZipArchive::new(Cursor::new(archive))
            .map_err(|e| ArchiveError::Unreadable(e.to_string()))?;

        let candidates: Vec<String> = zip
            .file_names()
            .filter(|name| !name.ends_with('/') && name.ends_with(suffix))
            .map(String::from)
            .collect();

        let Some(name) = candidates.iter().min().cloned() else {
            return Err(ArchiveError::EntryNotFound(suffix.to_string()));
        };

        if candidates.len() > 1 {
            tracing::warn!(
                entry = %name,
                candidates = candidates.len(),
                "Artifact holds several result files, using the first by name"
            );
        }

        let mut entry = zip
            .by_name(&name)
            .map_err(|e| ArchiveError::EntryUnreadable {
                name: name.clone(),
                reason: e.to_string(),
            })?;

        let mut content = Vec::new();
        entry
            .read_to_end(&mut content)
            .map_err(|e| ArchiveError::EntryUnreadable {
                name: name.clone(),
                reason: e.to_string(),
            })?;

        Ok(content)
    }
}
