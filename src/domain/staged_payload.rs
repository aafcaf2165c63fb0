use std::fmt;

use super::StoragePath;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backing {
    Inline,
    External,
}

impl Backing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backing::Inline => "inline",
            Backing::External => "external",
        }
    }
}

impl fmt::Display for Backing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The form in which a payload is reachable by the remote backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedPayload {
    /// Payload travels inside the dispatch event, base64 encoded.
    Inline { encoded: String },
    /// Payload lives in a staging store; the backend fetches it from `url`.
    External { path: StoragePath, url: String },
}

impl StagedPayload {
    pub fn backing(&self) -> Backing {
        match self {
            StagedPayload::Inline { .. } => Backing::Inline,
            StagedPayload::External { .. } => Backing::External,
        }
    }

    /// Opaque handle for logs; never includes inline payload bytes.
    pub fn reference(&self) -> &str {
        match self {
            StagedPayload::Inline { .. } => "inline",
            StagedPayload::External { url, .. } => url,
        }
    }
}
