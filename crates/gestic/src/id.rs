//! Observation identifier generation.

use crate::gesture_constants::{ID_ALPHABET, ID_CODE_LENGTH, ID_PREFIX};
use std::fmt;

/// Unique token identifying a registered observation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObservationId(String);

impl ObservationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues identifiers that stay unique for the generator's lifetime.
///
/// Each token is a random alphanumeric run followed by a strictly increasing
/// counter. The random run shrinks by the decimal width the counter has
/// already consumed, so the token keeps a stable length while the counter
/// guarantees uniqueness even when the random run collides. The counter never
/// resets.
#[derive(Debug, Default)]
pub(crate) struct IdGenerator {
    issued: u64,
}

impl IdGenerator {
    pub(crate) fn new() -> Self {
        Self { issued: 0 }
    }

    pub(crate) fn next(&mut self) -> ObservationId {
        let suffix = self.issued.to_string();
        let random_len = ID_CODE_LENGTH.saturating_sub(suffix.len());

        let mut token = String::with_capacity(ID_PREFIX.len() + ID_CODE_LENGTH.max(suffix.len()));
        token.push_str(ID_PREFIX);
        for _ in 0..random_len {
            token.push(ID_ALPHABET[fastrand::usize(..ID_ALPHABET.len())] as char);
        }
        token.push_str(&suffix);

        self.issued += 1;
        ObservationId(token)
    }
}
