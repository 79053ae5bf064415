use std::sync::Arc;

use agora_metadata::{Metadata, DEFAULT_DEFINITION};
use reqwest::StatusCode;
use serde_json::{json, Value};

const MODERATION_KEY: &str = "test-moderation-key";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let metadata = Metadata::from_toml_str(DEFAULT_DEFINITION).expect("default definition loads");
        let app = agora_api::app::build_app(Arc::new(metadata), MODERATION_KEY.to_string());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn laptop(title: &str) -> Value {
    json!({
        "basics": { "title": title, "summary": "Barely used" },
        "condition": { "state": "used" },
        "computer_specs": { "ram_gb": "16", "screen": "14\"" },
    })
}

async fn submit(client: &reqwest::Client, srv: &TestServer, category: &str, body: &Value) -> reqwest::Response {
    client
        .post(srv.url(&format!("/products/{category}")))
        .json(body)
        .send()
        .await
        .unwrap()
}

async fn submit_laptop(client: &reqwest::Client, srv: &TestServer, title: &str) -> String {
    let res = submit(client, srv, "laptops", &laptop(title)).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.unwrap();
    created["id"].as_str().unwrap().to_string()
}

async fn moderate(client: &reqwest::Client, srv: &TestServer, id: &str, action: &str) -> reqwest::Response {
    client
        .post(srv.url(&format!("/moderation/products/{id}/{action}")))
        .header("X-Moderation-API-Key", MODERATION_KEY)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn category_browser_starts_at_root() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let root: Value = client.get(srv.url("/categories")).send().await.unwrap().json().await.unwrap();
    assert_eq!(root["slug"], "root");
    let top: Vec<_> = root["subcategories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["slug"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(top, ["accessibility", "electronics"]);

    let res = client.get(srv.url("/categories/laptops")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let laptops: Value = res.json().await.unwrap();
    assert_eq!(laptops["is_leaf"], true);
    assert_eq!(laptops["parent"], "electronics");
    assert_eq!(laptops["fieldsets"], json!(["basics", "condition", "computer_specs"]));
    assert_eq!(laptops["name_field"], "basics.title");
}

#[tokio::test]
async fn unknown_category_is_404() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/categories/boats")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn category_fieldsets_and_schema_are_served() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let fieldsets: Value = client
        .get(srv.url("/categories/laptops/fieldsets"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let fieldsets = fieldsets.as_array().unwrap();
    assert_eq!(fieldsets.len(), 3);
    assert_eq!(fieldsets[1]["slug"], "condition");
    assert_eq!(fieldsets[1]["fields"][0]["type"], "dropdown");
    assert_eq!(
        fieldsets[1]["json_schema"]["properties"]["state"]["enum"],
        json!(["new", "used", "refurbished"])
    );

    let schema: Value = client
        .get(srv.url("/categories/laptops/schema"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(schema["basics"]["type"], "object");
    assert_eq!(schema["basics"]["required"], json!(["title", "summary"]));
    assert_eq!(schema["basics"]["properties"]["homepage"]["format"], "uri");
    assert_eq!(schema["computer_specs"]["required"], json!(["ram_gb", "screen"]));
}

#[tokio::test]
async fn submission_returns_pending_product_with_derived_fields() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = submit(&client, &srv, "laptops", &laptop("ThinkPad X1")).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.unwrap();
    assert_eq!(created["approved"], false);
    assert_eq!(created["name"], "ThinkPad X1");
    assert_eq!(created["description"], "Barely used");
    assert_eq!(created["featured_fields"]["computer_specs.ram_gb"], "16");

    let id = created["id"].as_str().unwrap();
    let fetched: Value = client
        .get(srv.url(&format!("/products/{id}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn invalid_submissions_are_400() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let mut missing = laptop("X");
    missing.as_object_mut().unwrap().remove("computer_specs");
    let mut wrong_type = laptop("X");
    wrong_type["computer_specs"]["ram_gb"] = json!(16);
    let mut bad_option = laptop("X");
    bad_option["condition"]["state"] = json!("mint");

    for body in [missing, wrong_type, bad_option] {
        let res = submit(&client, &srv, "laptops", &body).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body: {body}");
        let err: Value = res.json().await.unwrap();
        assert_eq!(err["error"], "validation_error");
    }

    let res = client
        .post(srv.url("/products/laptops"))
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = submit(&client, &srv, "electronics", &laptop("X")).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = submit(&client, &srv, "boats", &laptop("X")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn product_lookup_rejects_bad_and_unknown_ids() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(srv.url("/products/not-a-uuid")).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = reqwest::get(srv.url("/products/0190a5f0-0000-7000-8000-000000000000"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn moderation_requires_the_api_key() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/moderation/pending")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .get(srv.url("/moderation/pending"))
        .header("X-Moderation-API-Key", "wrong")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .get(srv.url("/moderation/pending"))
        .header("X-Moderation-API-Key", MODERATION_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn moderation_lifecycle_approve_and_reject() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let kept = submit_laptop(&client, &srv, "Kept").await;
    let dropped = submit_laptop(&client, &srv, "Dropped").await;

    let listed: Value = reqwest::get(srv.url("/products/by-category/laptops"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed, json!([]));

    let pending: Value = client
        .get(srv.url("/moderation/pending"))
        .header("X-Moderation-API-Key", MODERATION_KEY)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(pending.as_array().unwrap().len(), 2);

    let res = moderate(&client, &srv, &kept, "approve").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "id": kept, "status": "approved" }));

    let res = moderate(&client, &srv, &dropped, "reject").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "rejected");

    let listed: Value = reqwest::get(srv.url("/products/by-category/laptops"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<_> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Kept"]);

    let res = reqwest::get(srv.url(&format!("/products/{dropped}"))).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // A rejected product is gone, so moderating it again is a 404.
    let res = moderate(&client, &srv, &dropped, "approve").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
