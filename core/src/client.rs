//! Stateless HTTP request builder and response parser for ViaCEP.
//!
//! # Design
//! `CepClient` holds only a `base_url`. A lookup is split into
//! `build_lookup`, which produces an `HttpRequest`, and `parse_lookup`,
//! which consumes the `HttpResponse`. The caller executes the round trip
//! in between, keeping the core deterministic and free of I/O.

use serde_json::Value;
use tracing::debug;

use crate::cep::Cep;
use crate::error::LookupError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{is_error_flagged, Address};

/// Public ViaCEP endpoint.
pub const DEFAULT_BASE_URL: &str = "https://viacep.com.br";

/// Synchronous, stateless client for the ViaCEP API.
#[derive(Debug, Clone)]
pub struct CepClient {
    base_url: String,
}

impl Default for CepClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl CepClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/ws/{cep}/json/` with the code interpolated verbatim.
    pub fn build_lookup(&self, cep: &Cep) -> HttpRequest {
        let url = format!("{}/ws/{cep}/json/", self.base_url);
        debug!(%url, "built CEP lookup request");
        HttpRequest {
            method: HttpMethod::Get,
            url,
        }
    }

    /// Interpret a lookup response.
    ///
    /// A 2xx JSON object with a truthy `erro` is `NotFound`; any other 2xx
    /// object is an address. Non-2xx statuses and bodies that are not JSON
    /// objects are errors the form reports as connection failures.
    pub fn parse_lookup(&self, response: HttpResponse) -> Result<Address, LookupError> {
        check_status(&response)?;
        let body: Value = serde_json::from_str(&response.body)
            .map_err(|e| LookupError::Deserialization(e.to_string()))?;
        if !body.is_object() {
            return Err(LookupError::Deserialization(format!(
                "expected a JSON object, got {}",
                json_type(&body)
            )));
        }
        if is_error_flagged(&body) {
            return Err(LookupError::NotFound);
        }
        serde_json::from_value(body).map_err(|e| LookupError::Deserialization(e.to_string()))
    }
}

fn check_status(response: &HttpResponse) -> Result<(), LookupError> {
    if response.is_success() {
        return Ok(());
    }
    Err(LookupError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
