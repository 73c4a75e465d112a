//! The postal code accepted by a lookup.

use std::fmt;

use crate::error::LookupError;

/// Number of UTF-16 code units a CEP must have.
pub const CEP_LEN: usize = 8;

/// A lookup key that passed the length check.
///
/// Only the length is enforced, measured in UTF-16 code units the way the
/// screen's text field reports it. Characters are not checked for being
/// digits; the service rejects anything else with a 400, which surfaces as
/// a connection error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cep(String);

impl Cep {
    /// Accept `input` verbatim if it is exactly [`CEP_LEN`] UTF-16 code
    /// units long.
    pub fn parse(input: &str) -> Result<Self, LookupError> {
        let len = input.encode_utf16().count();
        if len != CEP_LEN {
            return Err(LookupError::InvalidFormat { len });
        }
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Cep {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
