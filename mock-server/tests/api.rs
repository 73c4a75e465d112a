use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;
use viacep_mock::{app, app_with, AddressRecord};

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- known codes ---

#[tokio::test]
async fn known_cep_returns_address() {
    let resp = app().oneshot(get("/ws/01310000/json/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let record: AddressRecord = body_json(resp).await;
    assert_eq!(record.logradouro, "Avenida Paulista");
    assert_eq!(record.bairro, "Bela Vista");
    assert_eq!(record.localidade, "São Paulo");
    assert_eq!(record.uf, "SP");
}

#[tokio::test]
async fn city_wide_cep_has_empty_street() {
    let resp = app().oneshot(get("/ws/69900000/json/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let record: AddressRecord = body_json(resp).await;
    assert!(record.logradouro.is_empty());
    assert!(record.bairro.is_empty());
    assert_eq!(record.localidade, "Rio Branco");
}

// --- unknown codes ---

#[tokio::test]
async fn unknown_cep_returns_erro_with_200() {
    let resp = app().oneshot(get("/ws/00000000/json/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body, serde_json::json!({ "erro": true }));
}

// --- malformed codes ---

#[tokio::test]
async fn short_cep_returns_400() {
    let resp = app().oneshot(get("/ws/0131000/json/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], b"Bad Request");
}

#[tokio::test]
async fn non_digit_cep_returns_400() {
    let resp = app().oneshot(get("/ws/abcdefgh/json/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unrelated_path_returns_404() {
    let resp = app().oneshot(get("/ws/01310000/xml/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- custom fixtures ---

#[tokio::test]
async fn app_with_serves_only_given_records() {
    let record = AddressRecord {
        cep: "12345-678".to_string(),
        logradouro: "Rua Teste".to_string(),
        bairro: "Centro".to_string(),
        localidade: "Testópolis".to_string(),
        uf: "TO".to_string(),
        ..AddressRecord::default()
    };
    let app = app_with([record.clone()]);

    let resp = app.clone().oneshot(get("/ws/12345678/json/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let served: AddressRecord = body_json(resp).await;
    assert_eq!(served, record);

    // Seed fixtures are not present.
    let resp = app.oneshot(get("/ws/01310000/json/")).await.unwrap();
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["erro"], true);
}

#[tokio::test]
async fn cloned_routers_share_fixtures_concurrently() {
    let app = app();
    let requests = ["/ws/01310000/json/", "/ws/20040002/json/", "/ws/69900000/json/"]
        .map(|uri| app.clone().oneshot(get(uri)));

    let [paulista, rio, acre] = requests;
    let (paulista, rio, acre) = tokio::join!(paulista, rio, acre);

    let cities: Vec<String> = vec![
        body_json::<AddressRecord>(paulista.unwrap()).await.localidade,
        body_json::<AddressRecord>(rio.unwrap()).await.localidade,
        body_json::<AddressRecord>(acre.unwrap()).await.localidade,
    ];
    assert_eq!(cities, ["São Paulo", "Rio de Janeiro", "Rio Branco"]);
}
