//! Address lookup core for the Consulta CEP screen.
//!
//! # Overview
//! Validates a Brazilian postal code (CEP), builds the ViaCEP request and
//! interprets the response without touching the network (host-does-IO).
//! The host app executes the HTTP round trip and draws the screen from
//! `FormView`.
//!
//! # Design
//! - `CepClient` is stateless; it holds only `base_url`.
//! - `LookupForm` owns the screen state and tags every lookup with a
//!   sequence number so superseded responses are dropped.
//! - Types use owned `String` / `Vec` fields to simplify FFI mapping.

pub mod cep;
pub mod client;
pub mod error;
pub mod form;
pub mod http;
pub mod types;
pub mod view;

pub use cep::Cep;
pub use client::{CepClient, DEFAULT_BASE_URL};
pub use error::{LookupError, LookupErrorKind};
pub use form::{Completion, LookupForm, PendingLookup};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::Address;
pub use view::{FormView, ResultLines};
