//! Verify the lookup flow against JSON test vectors stored in `test-vectors/`.
//!
//! Each case gives the raw input, the expected request (or `null` when
//! validation must stop the lookup), a simulated response or transport
//! error, and the expected address or error.

use cep_core::{
    Address, Cep, CepClient, HttpMethod, HttpResponse, LookupErrorKind, LookupForm,
};

const BASE_URL: &str = "http://localhost:3000";

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_kind(s: &str) -> LookupErrorKind {
    match s {
        "InvalidFormat" => LookupErrorKind::InvalidFormat,
        "NotFound" => LookupErrorKind::NotFound,
        "Connection" => LookupErrorKind::Connection,
        other => panic!("unknown expected_error: {other}"),
    }
}

fn vectors() -> serde_json::Value {
    let raw = include_str!("../../test-vectors/lookup.json");
    serde_json::from_str(raw).unwrap()
}

#[test]
fn client_test_vectors() {
    let client = CepClient::new(BASE_URL);
    for case in vectors()["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = case["input"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        // Verify validation + build
        let cep = match Cep::parse(input) {
            Ok(cep) => cep,
            Err(err) => {
                assert!(expected_req.is_null(), "{name}: unexpected rejection");
                assert_eq!(err.kind(), LookupErrorKind::InvalidFormat, "{name}: kind");
                continue;
            }
        };
        assert!(!expected_req.is_null(), "{name}: expected rejection");
        let req = client.build_lookup(&cep);
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: url");

        // Verify parse
        let Some(sim) = case.get("simulated_response") else {
            continue;
        };
        let response = HttpResponse::new(
            sim["status"].as_u64().unwrap() as u16,
            sim["body"].as_str().unwrap(),
        );
        let result = client.parse_lookup(response);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            assert_eq!(err.kind(), parse_kind(expected_error.as_str().unwrap()), "{name}: kind");
        } else {
            let address = result.unwrap();
            let expected: Address = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(address, expected, "{name}: parsed result");
        }
    }
}

#[test]
fn form_test_vectors() {
    for case in vectors()["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let mut form = LookupForm::new(CepClient::new(BASE_URL));
        form.set_input(case["input"].as_str().unwrap());

        form.fetch_address_with(|_| {
            if let Some(reason) = case.get("transport_error") {
                return Err(reason.as_str().unwrap().to_string());
            }
            let sim = &case["simulated_response"];
            Ok(HttpResponse::new(
                sim["status"].as_u64().unwrap() as u16,
                sim["body"].as_str().unwrap(),
            ))
        });

        if let Some(expected_message) = case.get("expected_message") {
            assert_eq!(form.error_message(), expected_message.as_str(), "{name}: message");
            assert!(form.address().is_none(), "{name}: address should be absent");
            assert!(form.view().result.is_none(), "{name}: no result lines");
        } else {
            assert!(form.error().is_none(), "{name}: unexpected error {:?}", form.error());
            let lines = form.view().result.expect("result lines");
            let expected: Vec<&str> = case["expected_view"]
                .as_array()
                .unwrap()
                .iter()
                .map(|l| l.as_str().unwrap())
                .collect();
            assert_eq!(
                vec![lines.street.as_str(), lines.neighborhood.as_str(), lines.city.as_str()],
                expected,
                "{name}: view"
            );
        }
    }
}
