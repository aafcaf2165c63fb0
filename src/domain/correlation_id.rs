use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;

const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 8;
const ARTIFACT_PREFIX: &str = "prediction-";

/// Identifier tying one inbound request to the remote run and artifact it produces.
///
/// Formatted as `req_<unix millis>_<8 base36 chars>`. The millisecond prefix keeps ids
/// roughly sortable for out-of-band investigation, the random suffix makes collisions
/// between requests allocated in the same millisecond negligible.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorrelationId(String);

impl CorrelationId {
    pub fn new() -> Self {
        Self::generate_with(Utc::now(), &mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> Self {
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
            .collect();
        Self(format!("req_{}_{}", now.timestamp_millis(), suffix))
    }

    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name the remote backend gives the artifact it uploads for this request.
    pub fn artifact_name(&self) -> String {
        format!("{}{}", ARTIFACT_PREFIX, self.0)
    }

    /// Exact comparison; a prefix match would let `req_1_a` claim `req_1_ab`'s output.
    pub fn matches_artifact(&self, artifact_name: &str) -> bool {
        artifact_name
            .strip_prefix(ARTIFACT_PREFIX)
            .is_some_and(|rest| rest == self.0)
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
