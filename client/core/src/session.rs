//! Session Identity
//!
//! A client instance talks to the router under a single session key. The
//! router uses the key to find its own copy of the conversation, so the key
//! is chosen once and never changes for the lifetime of the coordinator.
//! The client treats it as an opaque string.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default prefix for generated session keys
pub const DEFAULT_SESSION_PREFIX: &str = "web-demo-";

/// Exclusive upper bound of the random suffix
const SUFFIX_RANGE: u32 = 1000;

/// Session correlation key
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(String);

impl SessionKey {
    /// Generate a key from a prefix and a random numeric suffix
    pub fn generate(prefix: &str) -> Self {
        let suffix = rand::thread_rng().gen_range(0..SUFFIX_RANGE);
        Self(format!("{prefix}{suffix}"))
    }

    /// Borrow the key as a string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for SessionKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_uses_prefix() {
        let key = SessionKey::generate(DEFAULT_SESSION_PREFIX);
        let suffix = key
            .as_str()
            .strip_prefix("web-demo-")
            .expect("prefix kept");
        let n: u32 = suffix.parse().unwrap();
        assert!(n < SUFFIX_RANGE);
    }

    #[test]
    fn test_key_is_opaque() {
        let key = SessionKey::from("anything goes / here");
        assert_eq!(key.to_string(), "anything goes / here");
        assert_eq!(
            serde_json::to_string(&key).unwrap(),
            "\"anything goes / here\""
        );
    }
}
