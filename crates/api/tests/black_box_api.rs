use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build the same router as prod, but bind to an ephemeral port.
        let app = doceria_api::app::build_app();
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
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn create_product(
    client: &reqwest::Client,
    base_url: &str,
    name: &str,
    unit_price: u64,
) -> serde_json::Value {
    let res = client
        .post(format!("{base_url}/api/products"))
        .json(&json!({ "name": name, "unitPrice": unit_price }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_endpoint_responds() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn product_backed_sale_projects_catalog_item_and_total() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let bolo = create_product(&client, &server.base_url, "Bolo", 5_000).await;
    let bolo_id = bolo["id"].as_str().unwrap();

    let res = client
        .post(format!("{}/api/sales", server.base_url))
        .json(&json!({
            "customerName": "Maria",
            "totalAmount": 10_000,
            "date": "2024-06-01",
            "time": "14:30",
            "lines": [
                { "catalogItemId": bolo_id, "quantity": 2, "unitPrice": 5_000 }
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let sale: serde_json::Value = res.json().await.unwrap();

    assert_eq!(sale["status"], "Pending");
    let lines = sale["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    let line = lines[0].as_object().unwrap();
    assert_eq!(line["total"], 10_000);
    assert_eq!(line["catalogItem"]["name"], "Bolo");
    assert!(!line.contains_key("combo"));
}

#[tokio::test]
async fn combo_backed_sale_projects_nested_combo_lines() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let bolo = create_product(&client, &server.base_url, "Bolo", 5_000).await;
    let bolo_id = bolo["id"].as_str().unwrap();

    let res = client
        .post(format!("{}/api/combos", server.base_url))
        .json(&json!({
            "name": "Festa",
            "description": "party bundle",
            "totalPrice": 5_000,
            "lines": [
                { "catalogItemId": bolo_id, "quantity": 1, "unitPrice": 5_000 }
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let combo: serde_json::Value = res.json().await.unwrap();
    assert_eq!(combo["active"], true);
    let combo_id = combo["id"].as_str().unwrap();

    let res = client
        .post(format!("{}/api/sales", server.base_url))
        .json(&json!({
            "customerName": "Maria",
            "totalAmount": 5_000,
            "date": "2024-06-01",
            "time": "15:00:00",
            "lines": [
                { "comboId": combo_id, "quantity": 1, "unitPrice": 5_000 }
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let sale: serde_json::Value = res.json().await.unwrap();

    let line = sale["lines"][0].as_object().unwrap();
    assert!(!line.contains_key("catalogItem"));
    assert_eq!(line["combo"]["name"], "Festa");
    let nested = line["combo"]["lines"].as_array().unwrap();
    assert_eq!(nested.len(), 1);
    assert_eq!(nested[0]["catalogItem"]["name"], "Bolo");
}

#[tokio::test]
async fn sale_with_one_dangling_line_keeps_the_rest() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let bolo = create_product(&client, &server.base_url, "Bolo", 5_000).await;
    let bolo_id = bolo["id"].as_str().unwrap();
    let phantom = uuid_like_missing_id();

    let res = client
        .post(format!("{}/api/sales", server.base_url))
        .json(&json!({
            "customerName": "Maria",
            "totalAmount": 5_000,
            "date": "2024-06-01",
            "time": "14:30",
            "lines": [
                { "catalogItemId": bolo_id, "quantity": 1, "unitPrice": 5_000 },
                { "catalogItemId": phantom, "quantity": 4, "unitPrice": 100 }
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let sale: serde_json::Value = res.json().await.unwrap();
    assert_eq!(sale["lines"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn combo_creation_with_dangling_reference_fails_entirely() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let phantom = uuid_like_missing_id();
    let res = client
        .post(format!("{}/api/combos", server.base_url))
        .json(&json!({
            "name": "Festa",
            "totalPrice": 9_000,
            "lines": [
                { "catalogItemId": phantom, "quantity": 1, "unitPrice": 9_000 }
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "unresolved_reference");
    assert!(body["message"].as_str().unwrap().contains(&phantom));

    // Nothing was persisted.
    let res = client
        .get(format!("{}/api/combos", server.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn combo_update_replaces_the_whole_line_set() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let bolo = create_product(&client, &server.base_url, "Bolo", 5_000).await;
    let doce = create_product(&client, &server.base_url, "Brigadeiro", 150).await;
    let bolo_id = bolo["id"].as_str().unwrap();
    let doce_id = doce["id"].as_str().unwrap();

    let res = client
        .post(format!("{}/api/combos", server.base_url))
        .json(&json!({
            "name": "Festa",
            "totalPrice": 6_500,
            "lines": [
                { "catalogItemId": bolo_id, "quantity": 1, "unitPrice": 5_000 },
                { "catalogItemId": doce_id, "quantity": 10, "unitPrice": 150 },
                { "catalogItemId": doce_id, "quantity": 5, "unitPrice": 140 }
            ]
        }))
        .send()
        .await
        .unwrap();
    let combo: serde_json::Value = res.json().await.unwrap();
    let combo_id = combo["id"].as_str().unwrap();
    assert_eq!(combo["lines"].as_array().unwrap().len(), 3);

    let res = client
        .put(format!("{}/api/combos/{combo_id}", server.base_url))
        .json(&json!({
            "name": "Festa",
            "totalPrice": 5_000,
            "lines": [
                { "catalogItemId": bolo_id, "quantity": 1, "unitPrice": 5_000 }
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["lines"].as_array().unwrap().len(), 1);
    assert_eq!(updated["active"], true, "omitted active keeps stored value");
}

#[tokio::test]
async fn updating_a_missing_combo_is_not_found() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let phantom = uuid_like_missing_id();
    let res = client
        .put(format!("{}/api/combos/{phantom}", server.base_url))
        .json(&json!({ "name": "Festa", "totalPrice": 1, "lines": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains(&phantom));
}

#[tokio::test]
async fn commission_with_unparseable_delivery_date_fails_structurally() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/commissions", server.base_url))
        .json(&json!({
            "customerName": "Ana",
            "deliveryDate": "not-a-date",
            "amount": 9_000,
            "lines": []
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_date");

    // No commission was persisted.
    let res = client
        .get(format!("{}/api/commissions", server.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn status_updates_are_case_insensitive_and_unconstrained() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/sales", server.base_url))
        .json(&json!({
            "customerName": "Maria",
            "totalAmount": 0,
            "date": "2024-06-01",
            "time": "14:30",
            "status": "Delivered",
            "lines": []
        }))
        .send()
        .await
        .unwrap();
    let sale: serde_json::Value = res.json().await.unwrap();
    // Creation ignores the supplied status.
    assert_eq!(sale["status"], "Pending");
    let sale_id = sale["id"].as_str().unwrap();

    for (sent, expected) in [
        ("DELIVERED", "Delivered"),
        ("inpreparation", "InPreparation"),
        ("pending", "Pending"),
    ] {
        let res = client
            .put(format!("{}/api/sales/{sale_id}/status", server.base_url))
            .json(&json!({ "status": sent }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["status"], expected);
    }

    // Unknown name fails and leaves the sale unchanged.
    let res = client
        .put(format!("{}/api/sales/{sale_id}/status", server.base_url))
        .json(&json!({ "status": "shipped" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .get(format!("{}/api/sales/{sale_id}", server.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "Pending");
}

#[tokio::test]
async fn sales_filter_by_status_and_search_by_customer() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for customer in ["Maria", "João"] {
        let res = client
            .post(format!("{}/api/sales", server.base_url))
            .json(&json!({
                "customerName": customer,
                "totalAmount": 100,
                "date": "2024-06-01",
                "time": "10:00",
                "lines": []
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = client
        .get(format!("{}/api/sales/status/pending", server.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 2);

    let res = client
        .get(format!("{}/api/sales/status/ready", server.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["items"].as_array().unwrap().is_empty());

    let res = client
        .get(format!("{}/api/sales/search?term=mar", server.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["customer"], "Maria");
}

#[tokio::test]
async fn login_round_trip_and_hash_hiding() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/users", server.base_url))
        .json(&json!({
            "name": "Katie",
            "email": "katie@example.com",
            "password": "sugar-rush",
            "role": "staff"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let user: serde_json::Value = res.json().await.unwrap();
    assert!(user.get("passwordHash").is_none());

    let res = client
        .post(format!("{}/api/auth/login", server.base_url))
        .json(&json!({ "email": "katie@example.com", "password": "sugar-rush" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["token"].as_str().unwrap().starts_with("session-"));
    assert_eq!(body["user"]["email"], "katie@example.com");

    let res = client
        .post(format!("{}/api/auth/login", server.base_url))
        .json(&json!({ "email": "katie@example.com", "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn product_crud_round_trip() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let bolo = create_product(&client, &server.base_url, "Bolo", 5_000).await;
    let id = bolo["id"].as_str().unwrap();

    let res = client
        .put(format!("{}/api/products/{id}", server.base_url))
        .json(&json!({ "name": "Bolo de Cenoura", "unitPrice": 5_500, "expiresOn": "2024-12-31" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["name"], "Bolo de Cenoura");
    assert_eq!(updated["expiresOn"], "2024-12-31");

    let res = client
        .delete(format!("{}/api/products/{id}", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/api/products/{id}", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_amount_fails_with_structured_error() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/sales", server.base_url))
        .json(&json!({
            "customerName": "Maria",
            "totalAmount": "lots",
            "date": "2024-06-01",
            "time": "14:30",
            "lines": []
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "malformed_request");
    assert!(!body["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn commission_create_and_status_filter_round_trip() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let bolo = create_product(&client, &server.base_url, "Bolo", 5_000).await;
    let bolo_id = bolo["id"].as_str().unwrap();

    let res = client
        .post(format!("{}/api/commissions", server.base_url))
        .json(&json!({
            "customerName": "Ana",
            "description": "birthday order",
            "deliveryDate": "2024-07-15",
            "amount": 10_000,
            "lines": [
                { "catalogItemId": bolo_id, "quantity": 2, "unitPrice": 5_000 }
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let commission: serde_json::Value = res.json().await.unwrap();
    assert_eq!(commission["status"], "Pending");
    let commission_id = commission["id"].as_str().unwrap();
    let line = commission["lines"][0].as_object().unwrap();
    assert_eq!(line["catalogItem"], *bolo_id);

    let res = client
        .put(format!(
            "{}/api/commissions/{commission_id}/status",
            server.base_url
        ))
        .json(&json!({ "status": "ready" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/api/commissions/status/READY", server.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["customer"], "Ana");
}

#[tokio::test]
async fn cashflow_and_promotion_round_trips() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/cashflow", server.base_url))
        .json(&json!({
            "name": "flour restock",
            "unitPrice": 800,
            "quantity": 10,
            "total": 8_000,
            "date": "2024-06-01",
            "time": "09:00",
            "kind": "outflow"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let entry: serde_json::Value = res.json().await.unwrap();
    assert_eq!(entry["kind"], "outflow");

    let bolo = create_product(&client, &server.base_url, "Bolo", 5_000).await;
    let res = client
        .post(format!("{}/api/promotions", server.base_url))
        .json(&json!({
            "catalogItemId": bolo["id"],
            "description": "winter special",
            "startsOn": "2024-06-01",
            "endsOn": "2024-06-30"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let promotion: serde_json::Value = res.json().await.unwrap();
    assert_eq!(promotion["productId"], bolo["id"]);
}

/// A well-formed id that no record carries.
fn uuid_like_missing_id() -> String {
    "00000000-0000-7000-8000-000000000000".to_string()
}
