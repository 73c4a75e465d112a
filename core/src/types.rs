//! Domain DTOs for the ViaCEP API.
//!
//! # Design
//! Field names are English in Rust and mapped to ViaCEP's Portuguese keys
//! with `serde(rename)`. The service's schema is trusted: every field
//! defaults to an empty string when missing or `null` rather than failing
//! the lookup, and keys we do not use (`ibge`, `gia`, `siafi`, ...) are
//! ignored.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// An address returned by a successful lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    /// Street name (`logradouro`). Empty for city-wide CEPs.
    #[serde(rename = "logradouro", default, deserialize_with = "null_as_empty")]
    pub street: String,
    /// Neighborhood (`bairro`). Empty for city-wide CEPs.
    #[serde(rename = "bairro", default, deserialize_with = "null_as_empty")]
    pub neighborhood: String,
    #[serde(rename = "localidade", default, deserialize_with = "null_as_empty")]
    pub city: String,
    /// Two-letter state code (`uf`).
    #[serde(rename = "uf", default, deserialize_with = "null_as_empty")]
    pub state_code: String,
    /// Formatted CEP echoed by the service, e.g. `01310-000`.
    #[serde(rename = "cep", default, deserialize_with = "null_as_empty")]
    pub postal_code: String,
    #[serde(rename = "complemento", default, deserialize_with = "null_as_empty")]
    pub complement: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

impl Address {
    /// The `city - state` line shown under the street and neighborhood.
    pub fn city_line(&self) -> String {
        format!("{} - {}", self.city, self.state_code)
    }
}

/// Whether a ViaCEP body flags the code as unknown.
///
/// The `erro` field is read with JavaScript truthiness: `false`, `null`,
/// `0`, `""` and a missing key are falsy, everything else is truthy. ViaCEP
/// has sent both `true` and `"true"` over time.
pub fn is_error_flagged(body: &Value) -> bool {
    match body.get("erro") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
