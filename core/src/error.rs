//! Error types for CEP lookups.
//!
//! # Design
//! `LookupError` keeps the detail a developer needs (status codes, parser
//! messages). The form only ever shows one of three messages, so
//! `LookupError::kind` collapses every transport-level failure into
//! `LookupErrorKind::Connection`.

use thiserror::Error;

/// Message shown when the input is not exactly 8 UTF-16 code units long.
pub const INVALID_FORMAT_MESSAGE: &str = "CEP inválido. Deve conter 8 dígitos.";
/// Message shown when ViaCEP reports the code as unknown.
pub const NOT_FOUND_MESSAGE: &str = "CEP não encontrado.";
/// Message shown for any failed round trip.
pub const CONNECTION_MESSAGE: &str = "Erro ao buscar CEP. Verifique sua conexão.";

/// Errors produced while validating a CEP or interpreting a lookup response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The input is not exactly 8 UTF-16 code units long. No request is
    /// made.
    #[error("invalid CEP: expected 8 UTF-16 code units, got {len}")]
    InvalidFormat { len: usize },

    /// ViaCEP answered with a truthy `erro` field.
    #[error("CEP not found")]
    NotFound,

    /// The service returned a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body is not the JSON object we expect.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The host could not complete the round trip (DNS, timeout, reset...).
    #[error("transport failed: {0}")]
    Transport(String),
}

/// The three failure categories a user can see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupErrorKind {
    InvalidFormat,
    NotFound,
    Connection,
}

impl LookupErrorKind {
    /// Fixed user-facing message for this kind.
    pub fn message(&self) -> &'static str {
        match self {
            LookupErrorKind::InvalidFormat => INVALID_FORMAT_MESSAGE,
            LookupErrorKind::NotFound => NOT_FOUND_MESSAGE,
            LookupErrorKind::Connection => CONNECTION_MESSAGE,
        }
    }
}

impl LookupError {
    pub fn kind(&self) -> LookupErrorKind {
        match self {
            LookupError::InvalidFormat { .. } => LookupErrorKind::InvalidFormat,
            LookupError::NotFound => LookupErrorKind::NotFound,
            LookupError::Http { .. }
            | LookupError::Deserialization(_)
            | LookupError::Transport(_) => LookupErrorKind::Connection,
        }
    }
}
