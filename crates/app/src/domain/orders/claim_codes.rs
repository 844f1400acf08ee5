//! Claim Codes
//!
//! Short codes a customer reads out at the counter to collect an order.

use std::fmt;

use uuid::Uuid;

/// Number of characters in a claim code.
pub const CLAIM_CODE_LENGTH: usize = 8;

/// How many fresh codes checkout tries before giving up.
pub const MAX_CLAIM_CODE_ATTEMPTS: usize = 8;

/// An uppercase alphanumeric claim code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClaimCode(String);

impl ClaimCode {
    /// Derive a new code from a random v4 uuid.
    pub fn generate() -> Self {
        let mut code = Uuid::new_v4().simple().to_string();

        code.truncate(CLAIM_CODE_LENGTH);
        code.make_ascii_uppercase();

        Self(code)
    }

    /// Normalise user input for lookup: surrounding whitespace is ignored and case
    /// does not matter.
    pub fn normalize(input: &str) -> Self {
        Self(input.trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClaimCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
