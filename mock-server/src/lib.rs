use std::{cmp::Ordering, collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Usuario {
    pub id: String,
    pub nome: String,
    pub senha: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Endereco {
    pub cep: String,
    pub logradouro: String,
    pub complemento: String,
    pub bairro: String,
    pub localidade: String,
    pub uf: String,
    pub ibge: String,
    pub gia: String,
    pub ddd: String,
    pub siafi: String,
}

pub type Db = Arc<RwLock<HashMap<String, Usuario>>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router pre-populated with `seed`.
pub fn app_with(seed: Vec<Usuario>) -> Router {
    let db: Db = Arc::new(RwLock::new(
        seed.into_iter().map(|u| (u.id.clone(), u)).collect(),
    ));
    Router::new()
        .route("/usuarios", get(list_usuarios).post(create_usuario))
        .route("/usuarios/{id}", get(get_usuario).delete(delete_usuario))
        .route("/58013240/json/", get(get_endereco))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock server listening");
    }
    axum::serve(listener, app()).await
}

/// Numeric ids first, in numeric order, then the rest lexicographically.
fn by_id(a: &Usuario, b: &Usuario) -> Ordering {
    match (a.id.parse::<i64>(), b.id.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.id.cmp(&b.id),
    }
}

async fn list_usuarios(State(db): State<Db>) -> Json<Vec<Usuario>> {
    let usuarios = db.read().await;
    let mut list: Vec<Usuario> = usuarios.values().cloned().collect();
    list.sort_by(by_id);
    Json(list)
}

async fn create_usuario(
    State(db): State<Db>,
    Json(input): Json<Usuario>,
) -> Result<(StatusCode, Json<Usuario>), StatusCode> {
    let mut usuarios = db.write().await;
    if usuarios.contains_key(&input.id) {
        return Err(StatusCode::CONFLICT);
    }
    usuarios.insert(input.id.clone(), input.clone());
    Ok((StatusCode::CREATED, Json(input)))
}

async fn get_usuario(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Usuario>, StatusCode> {
    let usuarios = db.read().await;
    usuarios.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn delete_usuario(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let mut usuarios = db.write().await;
    usuarios.remove(&id).map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}

async fn get_endereco() -> Json<Endereco> {
    Json(endereco())
}

/// The fixed answer of the postal-code lookup.
pub fn endereco() -> Endereco {
    Endereco {
        cep: "58013-240".to_string(),
        logradouro: "Rua Desembargador Souto Maior".to_string(),
        complemento: String::new(),
        bairro: "Centro".to_string(),
        localidade: "João Pessoa".to_string(),
        uf: "PB".to_string(),
        ibge: "2507507".to_string(),
        gia: String::new(),
        ddd: "83".to_string(),
        siafi: "2051".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usuario(id: &str) -> Usuario {
        Usuario {
            id: id.to_string(),
            nome: format!("user {id}"),
            senha: "pw".to_string(),
        }
    }

    #[test]
    fn usuario_serializes_with_wire_names() {
        let json = serde_json::to_value(usuario("1")).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["nome"], "user 1");
        assert_eq!(json["senha"], "pw");
    }

    #[test]
    fn usuario_rejects_missing_senha() {
        let result: Result<Usuario, _> = serde_json::from_str(r#"{"id":"1","nome":"Ana"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn numeric_ids_sort_numerically() {
        let mut list = vec![usuario("10"), usuario("b"), usuario("2"), usuario("a")];
        list.sort_by(by_id);
        let ids: Vec<&str> = list.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["2", "10", "a", "b"]);
    }

    #[test]
    fn endereco_has_fixed_cep() {
        assert_eq!(endereco().cep, "58013-240");
        assert_eq!(endereco().uf, "PB");
    }
}
