#![allow(clippy::unwrap_used)]
// Boundary-contract tests: the injected-transport trait driven end-to-end
// against a real HTTP server, through a minimal reqwest-backed transport.
// The library itself never depends on reqwest; this adapter lives here to
// prove the contract a production transport has to satisfy.

use async_trait::async_trait;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use voxilo_api::resources::ApplicationInterface;
use voxilo_api::{Error, HttpMethod, Params, Response, Transport};

// ── Test transport ──────────────────────────────────────────────────

/// Reqwest adapter: query params for GET, JSON body otherwise.
struct HttpTransport {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: Url::parse(base_url).unwrap(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        params: &Params,
    ) -> Result<Response, Error> {
        let url = self.base_url.join(path).map_err(Error::transport)?;
        let request = match method {
            HttpMethod::Get => self.http.get(url).query(params),
            HttpMethod::Post => self.http.post(url).json(params),
            HttpMethod::Delete => self.http.delete(url).json(params),
        };

        let response = request.send().await.map_err(Error::transport)?;
        let response = response.error_for_status().map_err(Error::transport)?;
        let body = response.json().await.map_err(Error::transport)?;
        Ok(Response::new(body))
    }
}

async fn setup() -> (MockServer, ApplicationInterface) {
    let server = MockServer::start().await;
    let transport = std::sync::Arc::new(HttpTransport::new(&server.uri()));
    let interface = ApplicationInterface::new(transport);
    (server, interface)
}

// ── Tests ───────────────────────────────────────────────────────────

#[tokio::test]
async fn create_posts_json_body() {
    let (server, interface) = setup().await;

    Mock::given(method("POST"))
        .and(path("/Application/"))
        .and(body_partial_json(json!({
            "app_name": "prod-ivr",
            "is_voice_request": "true",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "app_id": "APP900",
            "message": "created",
        })))
        .mount(&server)
        .await;

    let created = interface.create("prod-ivr", Params::new()).await.unwrap();

    assert_eq!(created.id(), Some("APP900"));
}

#[tokio::test]
async fn get_sends_params_as_query_string() {
    let (server, interface) = setup().await;

    Mock::given(method("GET"))
        .and(path("/Application/APP900/"))
        .and(query_param("is_voice_request", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "app_id": "APP900",
            "app_name": "prod-ivr",
        })))
        .mount(&server)
        .await;

    let application = interface.get("APP900").await.unwrap();

    assert_eq!(application.id(), Some("APP900"));
    assert_eq!(application.get("app_name"), Some(&json!("prod-ivr")));
}

#[tokio::test]
async fn list_round_trips_pagination_meta() {
    let (server, interface) = setup().await;

    Mock::given(method("GET"))
        .and(path("/Application/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"totalCount": 2, "offset": 0, "limit": 20},
            "objects": [
                {"app_id": "APP1"},
                {"app_id": "APP2"},
            ],
        })))
        .mount(&server)
        .await;

    let page = interface.list(Params::new()).await.unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page[0].id(), Some("APP1"));
    assert_eq!(page.meta.total_count, 2);
}

#[tokio::test]
async fn delete_sends_coerced_cascade_in_body() {
    let (server, interface) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/Application/APP900/"))
        .and(body_partial_json(json!({"cascade": "true"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let mut params = Params::new();
    params.insert("cascade".to_owned(), json!(true));
    let deleted = interface.delete("APP900", params).await.unwrap();

    assert!(deleted);
}

#[tokio::test]
async fn http_failures_surface_as_transport_errors() {
    let (server, interface) = setup().await;

    Mock::given(method("GET"))
        .and(path("/Application/APP900/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let result = interface.get("APP900").await;

    assert!(result.unwrap_err().is_transport());
}
