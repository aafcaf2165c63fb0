/// Unpacks the compressed container a remote run publishes as its artifact.
pub trait ArchiveReader: Send + Sync {
    /// Returns the bytes of the first file entry whose name ends with `suffix`.
    fn read_entry_with_suffix(&self, archive: &[u8], suffix: &str)
    -> Result<Vec<u8>, ArchiveError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("unreadable archive: {0}")]
    Unreadable(String),
    #[error("no entry with suffix '{0}'")]
    EntryNotFound(String),
    #[error("failed to read entry '{name}': {reason}")]
    EntryUnreadable { name: String, reason: String },
}
