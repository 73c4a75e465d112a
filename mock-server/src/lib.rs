//! In-process stand-in for the ViaCEP lookup endpoint.
//!
//! Serves `GET /ws/{cep}/json/` the way the public service does: malformed
//! codes get a 400, unknown codes get `{"erro": true}` with a 200, known
//! codes get the address record.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tracing::info;

/// An address record in ViaCEP's wire format.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddressRecord {
    /// Formatted code, `NNNNN-NNN`.
    pub cep: String,
    pub logradouro: String,
    pub complemento: String,
    pub bairro: String,
    pub localidade: String,
    pub uf: String,
    pub ibge: String,
    pub ddd: String,
}

impl AddressRecord {
    /// The code with the hyphen removed, as it appears in request paths.
    pub fn key(&self) -> String {
        self.cep.chars().filter(|c| *c != '-').collect()
    }
}

/// Fixtures keyed by the unformatted code. Read-only once the router is built.
pub type Db = Arc<HashMap<String, AddressRecord>>;

/// Fixtures served by [`app`].
pub fn seed_records() -> Vec<AddressRecord> {
    vec![
        AddressRecord {
            cep: "01310-000".to_string(),
            logradouro: "Avenida Paulista".to_string(),
            complemento: "até 610 - lado par".to_string(),
            bairro: "Bela Vista".to_string(),
            localidade: "São Paulo".to_string(),
            uf: "SP".to_string(),
            ibge: "3550308".to_string(),
            ddd: "11".to_string(),
        },
        AddressRecord {
            cep: "20040-002".to_string(),
            logradouro: "Avenida Rio Branco".to_string(),
            complemento: "de 1 a 89 - lado ímpar".to_string(),
            bairro: "Centro".to_string(),
            localidade: "Rio de Janeiro".to_string(),
            uf: "RJ".to_string(),
            ibge: "3304557".to_string(),
            ddd: "21".to_string(),
        },
        // City-wide code: no street or neighborhood.
        AddressRecord {
            cep: "69900-000".to_string(),
            logradouro: String::new(),
            complemento: String::new(),
            bairro: String::new(),
            localidade: "Rio Branco".to_string(),
            uf: "AC".to_string(),
            ibge: "1200401".to_string(),
            ddd: "68".to_string(),
        },
    ]
}

pub fn app() -> Router {
    app_with(seed_records())
}

/// Router serving exactly `records`.
pub fn app_with(records: impl IntoIterator<Item = AddressRecord>) -> Router {
    let db: Db = Arc::new(records.into_iter().map(|r| (r.key(), r)).collect());
    Router::new()
        .route("/ws/{cep}/json/", get(lookup))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// ViaCEP only accepts exactly eight ASCII digits.
pub fn is_well_formed(cep: &str) -> bool {
    cep.len() == 8 && cep.bytes().all(|b| b.is_ascii_digit())
}

async fn lookup(State(db): State<Db>, Path(cep): Path<String>) -> Response {
    if !is_well_formed(&cep) {
        info!(%cep, "rejecting malformed CEP");
        return (StatusCode::BAD_REQUEST, "Bad Request").into_response();
    }
    match db.get(&cep) {
        Some(record) => {
            info!(%cep, city = %record.localidade, "CEP found");
            Json(record.clone()).into_response()
        }
        None => {
            info!(%cep, "CEP not found");
            Json(json!({ "erro": true })).into_response()
        }
    }
}
