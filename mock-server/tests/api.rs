use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Endereco, Usuario};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

fn usuario(id: &str, nome: &str) -> Usuario {
    Usuario {
        id: id.to_string(),
        nome: nome.to_string(),
        senha: "pw".to_string(),
    }
}

// --- list ---

#[tokio::test]
async fn list_usuarios_empty() {
    let resp = app().oneshot(request("GET", "/usuarios")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let usuarios: Vec<Usuario> = body_json(resp).await;
    assert!(usuarios.is_empty());
}

#[tokio::test]
async fn list_usuarios_is_ordered_by_id() {
    let app = app_with(vec![usuario("10", "Jo"), usuario("2", "Bia"), usuario("1", "Ana")]);
    let resp = app.oneshot(request("GET", "/usuarios")).await.unwrap();

    let usuarios: Vec<Usuario> = body_json(resp).await;
    let ids: Vec<&str> = usuarios.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "10"]);
}

// --- create ---

#[tokio::test]
async fn create_usuario_echoes_body() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/usuarios",
            r#"{"id":"1","nome":"Ana","senha":"123"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Usuario = body_json(resp).await;
    assert_eq!(created, Usuario { id: "1".into(), nome: "Ana".into(), senha: "123".into() });
}

#[tokio::test]
async fn create_usuario_duplicate_id_returns_409() {
    let app = app_with(vec![usuario("1", "Ana")]);
    let resp = app
        .oneshot(json_request(
            "POST",
            "/usuarios",
            r#"{"id":"1","nome":"Outra","senha":"x"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn create_usuario_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/usuarios", r#"{"nome":"sem id"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_usuario_not_found() {
    let resp = app().oneshot(request("GET", "/usuarios/999")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_usuario_accepts_non_numeric_id() {
    let app = app_with(vec![usuario("abc", "Ana")]);
    let resp = app.oneshot(request("GET", "/usuarios/abc")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Usuario = body_json(resp).await;
    assert_eq!(fetched.nome, "Ana");
}

// --- delete ---

#[tokio::test]
async fn delete_usuario_not_found() {
    let resp = app().oneshot(request("DELETE", "/usuarios/5")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- address lookup ---

#[tokio::test]
async fn endereco_is_fixed() {
    let resp = app().oneshot(request("GET", "/58013240/json/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let endereco: Endereco = body_json(resp).await;
    assert_eq!(endereco.cep, "58013-240");
    assert_eq!(endereco.localidade, "João Pessoa");
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/usuarios",
            r#"{"id":"1","nome":"Ana","senha":"123"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // list — should contain the one user
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request("GET", "/usuarios"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let usuarios: Vec<Usuario> = body_json(resp).await;
    assert_eq!(usuarios.len(), 1);
    assert_eq!(usuarios[0].id, "1");

    // get
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request("GET", "/usuarios/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Usuario = body_json(resp).await;
    assert_eq!(fetched.nome, "Ana");

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request("DELETE", "/usuarios/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let body = body_bytes(resp).await;
    assert!(body.is_empty());

    // get after delete — 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request("GET", "/usuarios/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete — empty
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request("GET", "/usuarios"))
        .await
        .unwrap();
    let usuarios: Vec<Usuario> = body_json(resp).await;
    assert!(usuarios.is_empty());
}
