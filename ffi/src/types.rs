//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, nullable pointers instead of
//! `Option`, and enums with explicit discriminants. Conversions live here
//! to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use cep_core::{Address, FormView, HttpMethod, LookupError, LookupErrorKind, PendingLookup};

/// Opaque handle to a `CepClient`.
pub struct FfiCepClient {
    pub(crate) inner: cep_core::CepClient,
}

/// Opaque handle to a `LookupForm`. One per screen.
pub struct FfiLookupForm {
    pub(crate) inner: cep_core::LookupForm,
}

/// Allocate a C string, dropping interior NUL bytes instead of failing.
pub(crate) fn c_string(s: impl Into<Vec<u8>>) -> *mut c_char {
    let cstring = CString::new(s).unwrap_or_else(|e| {
        let mut bytes = e.into_vec();
        bytes.retain(|b| *b != 0);
        CString::new(bytes).unwrap_or_default()
    });
    cstring.into_raw()
}

fn optional_c_string(s: Option<&str>) -> *mut c_char {
    match s {
        Some(s) => c_string(s),
        None => std::ptr::null_mut(),
    }
}

/// Free a string produced by `c_string`. Null is ignored.
pub(crate) fn drop_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
        }
    }
}

/// A lookup request the host must execute. Lookups carry no headers and
/// no body.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
}

impl FfiHttpRequest {
    pub(crate) fn from_core(req: cep_core::HttpRequest) -> *mut Self {
        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url: c_string(req.url),
        }))
    }
}

/// A request issued by a form, tagged with the sequence number to pass back
/// to `cep_form_complete` or `cep_form_fail`.
#[repr(C)]
pub struct FfiPendingLookup {
    pub sequence: u64,
    pub request: *mut FfiHttpRequest,
}

impl FfiPendingLookup {
    pub(crate) fn from_core(pending: PendingLookup) -> *mut Self {
        Box::into_raw(Box::new(FfiPendingLookup {
            sequence: pending.sequence,
            request: FfiHttpRequest::from_core(pending.request),
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller builds this on the stack after executing a request. The FFI
/// layer reads but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiLookupResult`.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    InvalidFormat = 1,
    NotFound = 2,
    Connection = 3,
    Panic = 4,
    NullArg = 5,
}

impl From<LookupErrorKind> for FfiErrorCode {
    fn from(kind: LookupErrorKind) -> Self {
        match kind {
            LookupErrorKind::InvalidFormat => FfiErrorCode::InvalidFormat,
            LookupErrorKind::NotFound => FfiErrorCode::NotFound,
            LookupErrorKind::Connection => FfiErrorCode::Connection,
        }
    }
}

/// Outcome of reporting a response or failure to a form.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiCompletion {
    Applied = 0,
    /// A newer lookup superseded this one; nothing changed.
    Stale = 1,
    NullArg = 2,
    Panic = 3,
}

impl From<cep_core::Completion> for FfiCompletion {
    fn from(c: cep_core::Completion) -> Self {
        match c {
            cep_core::Completion::Applied => FfiCompletion::Applied,
            cep_core::Completion::Stale => FfiCompletion::Stale,
        }
    }
}

/// An address exposed to C. Empty fields are empty strings, never null.
#[repr(C)]
pub struct FfiAddress {
    pub street: *mut c_char,
    pub neighborhood: *mut c_char,
    pub city: *mut c_char,
    pub state_code: *mut c_char,
    pub postal_code: *mut c_char,
    pub complement: *mut c_char,
}

impl FfiAddress {
    fn from_core(address: &Address) -> *mut Self {
        Box::into_raw(Box::new(FfiAddress {
            street: c_string(address.street.as_str()),
            neighborhood: c_string(address.neighborhood.as_str()),
            city: c_string(address.city.as_str()),
            state_code: c_string(address.state_code.as_str()),
            postal_code: c_string(address.postal_code.as_str()),
            complement: c_string(address.complement.as_str()),
        }))
    }

    /// Free the struct and its strings.
    pub(crate) fn free(ptr: *mut Self) {
        if ptr.is_null() {
            return;
        }
        let address = unsafe { Box::from_raw(ptr) };
        drop_c_string(address.street);
        drop_c_string(address.neighborhood);
        drop_c_string(address.city);
        drop_c_string(address.state_code);
        drop_c_string(address.postal_code);
        drop_c_string(address.complement);
    }
}

/// Result envelope for lookups.
///
/// On success `error_code` is `Ok`, both messages are null and `address`
/// is set. On failure `message` is the line to show the user, `detail`
/// describes the underlying cause, and `address` is null. `http_status` is
/// non-zero only when the service answered with a non-2xx status.
#[repr(C)]
pub struct FfiLookupResult {
    pub error_code: FfiErrorCode,
    pub message: *mut c_char,
    pub detail: *mut c_char,
    pub http_status: u16,
    pub address: *mut FfiAddress,
}

impl FfiLookupResult {
    pub(crate) fn from_core(outcome: Result<&Address, &LookupError>) -> *mut Self {
        match outcome {
            Ok(address) => Self::ok(address),
            Err(err) => Self::from_error(err),
        }
    }

    pub(crate) fn ok(address: &Address) -> *mut Self {
        Box::into_raw(Box::new(FfiLookupResult {
            error_code: FfiErrorCode::Ok,
            message: std::ptr::null_mut(),
            detail: std::ptr::null_mut(),
            http_status: 0,
            address: FfiAddress::from_core(address),
        }))
    }

    pub(crate) fn from_error(err: &LookupError) -> *mut Self {
        let http_status = match err {
            LookupError::Http { status, .. } => *status,
            _ => 0,
        };
        let kind = err.kind();
        Box::into_raw(Box::new(FfiLookupResult {
            error_code: kind.into(),
            message: c_string(kind.message()),
            detail: c_string(err.to_string()),
            http_status,
            address: std::ptr::null_mut(),
        }))
    }

    /// A form that has not settled a lookup yet: no address, no error.
    pub(crate) fn empty() -> *mut Self {
        Box::into_raw(Box::new(FfiLookupResult {
            error_code: FfiErrorCode::Ok,
            message: std::ptr::null_mut(),
            detail: std::ptr::null_mut(),
            http_status: 0,
            address: std::ptr::null_mut(),
        }))
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failure(FfiErrorCode::NullArg, &format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::failure(FfiErrorCode::Panic, msg)
    }

    fn failure(error_code: FfiErrorCode, detail: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiLookupResult {
            error_code,
            message: std::ptr::null_mut(),
            detail: c_string(detail),
            http_status: 0,
            address: std::ptr::null_mut(),
        }))
    }
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// Everything the screen displays. `error` and the three result lines are
/// null when absent.
#[repr(C)]
pub struct FfiFormView {
    pub title: *mut c_char,
    pub input_placeholder: *mut c_char,
    pub input: *mut c_char,
    pub button_label: *mut c_char,
    pub loading: bool,
    pub error: *mut c_char,
    pub street_line: *mut c_char,
    pub neighborhood_line: *mut c_char,
    pub city_line: *mut c_char,
}

impl FfiFormView {
    pub(crate) fn from_core(view: FormView) -> *mut Self {
        let lines = view.result.as_ref();
        Box::into_raw(Box::new(FfiFormView {
            title: c_string(view.title),
            input_placeholder: c_string(view.input_placeholder),
            input: c_string(view.input.as_str()),
            button_label: c_string(view.button_label),
            loading: view.loading,
            error: optional_c_string(view.error),
            street_line: optional_c_string(lines.map(|l| l.street.as_str())),
            neighborhood_line: optional_c_string(lines.map(|l| l.neighborhood.as_str())),
            city_line: optional_c_string(lines.map(|l| l.city.as_str())),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[test]
    fn c_string_drops_interior_nul() {
        let ptr = c_string("Rua\0 A");
        let s = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string();
        drop_c_string(ptr);
        assert_eq!(s, "Rua A");
    }

    #[test]
    fn error_codes_follow_kind() {
        assert_eq!(
            FfiErrorCode::from(LookupErrorKind::InvalidFormat),
            FfiErrorCode::InvalidFormat
        );
        assert_eq!(FfiErrorCode::from(LookupErrorKind::NotFound), FfiErrorCode::NotFound);
        assert_eq!(
            FfiErrorCode::from(LookupErrorKind::Connection),
            FfiErrorCode::Connection
        );
    }
}
