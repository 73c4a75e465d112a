//! C-ABI wrapper around `cep-core`.
//!
//! # Overview
//! Exposes CEP validation, request building, response interpretation and
//! the lookup form state through `extern "C"` functions, so an iOS, Android
//! or C host can drive the screen while doing the HTTP itself.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `cep_build_lookup` / `cep_parse_lookup` mirror the stateless client.
//! - `cep_form_*` wrap `LookupForm`; the host passes the sequence number
//!   from `FfiPendingLookup` back with the response so stale responses are
//!   dropped.
//! - The C caller owns all returned pointers and must call the matching
//!   `cep_free_*` function to release them.

pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::catch_unwind;

use cep_core::http::HttpResponse;
use cep_core::{Cep, CepClient, LookupForm};

use types::*;

/// Read a caller-provided C string, replacing invalid UTF-8.
fn read_c_str(ptr: *const c_char) -> String {
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

/// Build a client from a nullable base URL; null selects ViaCEP.
fn client_from(base_url: *const c_char) -> CepClient {
    if base_url.is_null() {
        CepClient::default()
    } else {
        CepClient::new(&read_c_str(base_url))
    }
}

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body is
/// read as an empty string.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        read_c_str(resp.body)
    };
    HttpResponse::new(resp.status, body)
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Create a stateless `CepClient`. `base_url` may be null to target
/// `https://viacep.com.br`.
///
/// The caller must free the returned pointer with `cep_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn cep_client_new(base_url: *const c_char) -> *mut FfiCepClient {
    catch_unwind(|| {
        let client = client_from(base_url);
        Box::into_raw(Box::new(FfiCepClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `cep_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn cep_client_free(client: *mut FfiCepClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

/// Build the lookup request for `cep`.
///
/// Returns null if an argument is null or `cep` does not have exactly 8
/// characters. The caller must free the result with `cep_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn cep_build_lookup(
    client: *const FfiCepClient,
    cep: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || cep.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        match Cep::parse(&read_c_str(cep)) {
            Ok(cep) => FfiHttpRequest::from_core(client.inner.build_lookup(&cep)),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Interpret the response to a lookup request.
///
/// The caller must free the result with `cep_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn cep_parse_lookup(
    client: *const FfiCepClient,
    response: *const FfiHttpResponse,
) -> *mut FfiLookupResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiLookupResult::null_arg("client");
        }
        if response.is_null() {
            return FfiLookupResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        match client.inner.parse_lookup(ffi_response_to_core(resp)) {
            Ok(address) => FfiLookupResult::ok(&address),
            Err(e) => FfiLookupResult::from_error(&e),
        }
    })
    .unwrap_or_else(|_| FfiLookupResult::panic("panic in cep_parse_lookup"))
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// Create an empty lookup form. `base_url` may be null to target ViaCEP.
///
/// The caller must free the returned pointer with `cep_form_free`.
#[unsafe(no_mangle)]
pub extern "C" fn cep_form_new(base_url: *const c_char) -> *mut FfiLookupForm {
    catch_unwind(|| {
        let form = LookupForm::new(client_from(base_url));
        Box::into_raw(Box::new(FfiLookupForm { inner: form }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a form created by `cep_form_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn cep_form_free(form: *mut FfiLookupForm) {
    if !form.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(form) });
        });
    }
}

/// Replace the input text. Returns false if an argument is null.
#[unsafe(no_mangle)]
pub extern "C" fn cep_form_set_input(form: *mut FfiLookupForm, text: *const c_char) -> bool {
    catch_unwind(|| {
        if form.is_null() || text.is_null() {
            return false;
        }
        let form = unsafe { &mut *form };
        form.inner.set_input(read_c_str(text));
        true
    })
    .unwrap_or(false)
}

/// Start a lookup for the current input.
///
/// Returns null when the input failed validation (the form now carries the
/// error; redraw with `cep_form_view`) or when `form` is null. Otherwise the
/// host executes `request` and reports back with `cep_form_complete` or
/// `cep_form_fail`. Free the result with `cep_free_pending`.
#[unsafe(no_mangle)]
pub extern "C" fn cep_form_fetch_address(form: *mut FfiLookupForm) -> *mut FfiPendingLookup {
    catch_unwind(|| {
        if form.is_null() {
            return std::ptr::null_mut();
        }
        let form = unsafe { &mut *form };
        match form.inner.fetch_address() {
            Some(pending) => FfiPendingLookup::from_core(pending),
            None => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Report the HTTP response received for lookup `sequence`.
#[unsafe(no_mangle)]
pub extern "C" fn cep_form_complete(
    form: *mut FfiLookupForm,
    sequence: u64,
    response: *const FfiHttpResponse,
) -> FfiCompletion {
    catch_unwind(|| {
        if form.is_null() || response.is_null() {
            return FfiCompletion::NullArg;
        }
        let form = unsafe { &mut *form };
        let resp = unsafe { &*response };
        form.inner.complete(sequence, ffi_response_to_core(resp)).into()
    })
    .unwrap_or(FfiCompletion::Panic)
}

/// Report that lookup `sequence` failed before a response arrived.
/// `reason` may be null.
#[unsafe(no_mangle)]
pub extern "C" fn cep_form_fail(
    form: *mut FfiLookupForm,
    sequence: u64,
    reason: *const c_char,
) -> FfiCompletion {
    catch_unwind(|| {
        if form.is_null() {
            return FfiCompletion::NullArg;
        }
        let form = unsafe { &mut *form };
        let reason = if reason.is_null() {
            "unknown transport error".to_string()
        } else {
            read_c_str(reason)
        };
        form.inner.fail(sequence, reason).into()
    })
    .unwrap_or(FfiCompletion::Panic)
}

/// Snapshot the form's last outcome: the address, the error, or neither.
///
/// The caller must free the result with `cep_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn cep_form_result(form: *const FfiLookupForm) -> *mut FfiLookupResult {
    catch_unwind(|| {
        if form.is_null() {
            return FfiLookupResult::null_arg("form");
        }
        let form = unsafe { &*form };
        match (form.inner.address(), form.inner.error()) {
            (Some(address), _) => FfiLookupResult::from_core(Ok(address)),
            (None, Some(err)) => FfiLookupResult::from_core(Err(err)),
            (None, None) => FfiLookupResult::empty(),
        }
    })
    .unwrap_or_else(|_| FfiLookupResult::panic("panic in cep_form_result"))
}

/// Snapshot what the screen should display.
///
/// Returns null if `form` is null. Free the result with `cep_free_view`.
#[unsafe(no_mangle)]
pub extern "C" fn cep_form_view(form: *const FfiLookupForm) -> *mut FfiFormView {
    catch_unwind(|| {
        if form.is_null() {
            return std::ptr::null_mut();
        }
        let form = unsafe { &*form };
        FfiFormView::from_core(form.inner.view())
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by `cep_build_lookup`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn cep_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        drop_c_string(req.url);
    });
}

/// Free an `FfiPendingLookup` and the request it carries.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn cep_free_pending(pending: *mut FfiPendingLookup) {
    if pending.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let pending = unsafe { Box::from_raw(pending) };
        cep_free_request(pending.request);
    });
}

/// Free an `FfiLookupResult` and its address. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn cep_free_result(result: *mut FfiLookupResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        drop_c_string(result.message);
        drop_c_string(result.detail);
        FfiAddress::free(result.address);
    });
}

/// Free an `FfiFormView`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn cep_free_view(view: *mut FfiFormView) {
    if view.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let view = unsafe { Box::from_raw(view) };
        drop_c_string(view.title);
        drop_c_string(view.input_placeholder);
        drop_c_string(view.input);
        drop_c_string(view.button_label);
        drop_c_string(view.error);
        drop_c_string(view.street_line);
        drop_c_string(view.neighborhood_line);
        drop_c_string(view.city_line);
    });
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
