//! State container for the lookup screen.
//!
//! # Design
//! `LookupForm` owns the input text, the last address and the last error.
//! A lookup is split the same way `CepClient` splits it: `fetch_address`
//! clears the previous outcome, validates, and hands back a
//! `PendingLookup`; the host runs the request and reports back through
//! `complete` or `fail`.
//!
//! Every `fetch_address` call takes a new sequence number. Only the most
//! recent one can settle the form; an older request that lands later is
//! reported as `Completion::Stale` and dropped.

use std::fmt::Display;

use tracing::{debug, info, warn};

use crate::cep::Cep;
use crate::client::CepClient;
use crate::error::{LookupError, LookupErrorKind};
use crate::http::{HttpRequest, HttpResponse};
use crate::types::Address;
use crate::view::FormView;

/// A request the host must execute, tagged with the sequence number to pass
/// back to `LookupForm::complete` or `LookupForm::fail`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLookup {
    pub sequence: u64,
    pub request: HttpRequest,
}

/// What happened to a reported outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The outcome settled the form.
    Applied,
    /// A newer lookup superseded this one; the outcome was dropped.
    Stale,
}

#[derive(Debug, Default)]
pub struct LookupForm {
    client: CepClient,
    input: String,
    address: Option<Address>,
    error: Option<LookupError>,
    sequence: u64,
    in_flight: Option<u64>,
}

impl LookupForm {
    pub fn new(client: CepClient) -> Self {
        Self {
            client,
            ..Self::default()
        }
    }

    /// Replace the input text. No validation happens here.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// Detailed error of the last lookup, if it failed.
    pub fn error(&self) -> Option<&LookupError> {
        self.error.as_ref()
    }

    pub fn error_kind(&self) -> Option<LookupErrorKind> {
        self.error.as_ref().map(LookupError::kind)
    }

    /// The user-facing error line, if any.
    pub fn error_message(&self) -> Option<&'static str> {
        self.error_kind().map(|kind| kind.message())
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start a lookup for the current input.
    ///
    /// Clears the previous address and error first. Returns `None` when the
    /// input fails validation; the form then carries an
    /// `InvalidFormat` error and no request must be made.
    pub fn fetch_address(&mut self) -> Option<PendingLookup> {
        self.address = None;
        self.error = None;
        self.sequence += 1;
        let sequence = self.sequence;

        match Cep::parse(&self.input) {
            Ok(cep) => {
                let request = self.client.build_lookup(&cep);
                self.in_flight = Some(sequence);
                debug!(sequence, cep = %cep, "lookup issued");
                Some(PendingLookup { sequence, request })
            }
            Err(err) => {
                self.in_flight = None;
                debug!(sequence, error = %err, "lookup rejected");
                self.error = Some(err);
                None
            }
        }
    }

    /// Report the response the host received for `sequence`.
    pub fn complete(&mut self, sequence: u64, response: HttpResponse) -> Completion {
        if !self.accepts(sequence) {
            return Completion::Stale;
        }
        let outcome = self.client.parse_lookup(response);
        self.settle(sequence, outcome)
    }

    /// Report that the round trip for `sequence` failed before a response
    /// arrived.
    pub fn fail(&mut self, sequence: u64, reason: impl Display) -> Completion {
        if !self.accepts(sequence) {
            return Completion::Stale;
        }
        self.settle(sequence, Err(LookupError::Transport(reason.to_string())))
    }

    /// Run a whole lookup through a synchronous transport.
    ///
    /// The transport is not called when validation fails.
    pub fn fetch_address_with<F, E>(&mut self, transport: F)
    where
        F: FnOnce(&HttpRequest) -> Result<HttpResponse, E>,
        E: Display,
    {
        let Some(pending) = self.fetch_address() else {
            return;
        };
        match transport(&pending.request) {
            Ok(response) => self.complete(pending.sequence, response),
            Err(err) => self.fail(pending.sequence, err),
        };
    }

    pub fn view(&self) -> FormView {
        FormView::new(
            &self.input,
            self.is_loading(),
            self.error_message(),
            self.address.as_ref(),
        )
    }

    fn accepts(&self, sequence: u64) -> bool {
        if self.in_flight == Some(sequence) {
            return true;
        }
        debug!(sequence, latest = self.sequence, "stale lookup dropped");
        false
    }

    fn settle(&mut self, sequence: u64, outcome: Result<Address, LookupError>) -> Completion {
        self.in_flight = None;
        match outcome {
            Ok(address) => {
                info!(sequence, city = %address.city, uf = %address.state_code, "address found");
                self.address = Some(address);
            }
            Err(err) => {
                match err.kind() {
                    LookupErrorKind::Connection => warn!(sequence, error = %err, "lookup failed"),
                    _ => info!(sequence, error = %err, "lookup rejected"),
                }
                self.error = Some(err);
            }
        }
        Completion::Applied
    }
}
