//! Router tests driving the full axum stack against a mock database.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Utc;
use druk_api::{AppState, create_router};
use druk_core::auth::hash_password;
use druk_core::chain::{MintError, MintReceipt, NftMinter};
use druk_db::entities::{
    cultural_activities, government_services, job_applications, jobs, mini_apps, products,
    residency_applications, user_activities, users,
};
use druk_shared::AppConfig;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, Value};
use serde_json::{Value as Json, json};
use tower::ServiceExt;

fn state(db: DatabaseConnection) -> AppState {
    AppState::new(db, AppConfig::with_database_url("postgres://mock"))
}

fn transaction_log(pool: Arc<DatabaseConnection>) -> String {
    let db = Arc::into_inner(pool).expect("router released the pool");
    format!("{:?}", db.into_transaction_log())
}

fn empty_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Json) {
    let response = create_router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Json::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_json(method: &str, uri: &str, body: &Json) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn user(id: i32, points: i32, password_hash: &str) -> users::Model {
    let now = Utc::now().into();
    users::Model {
        id,
        email: "tashi@druk.bt".to_string(),
        first_name: "Tashi".to_string(),
        last_name: "Dorji".to_string(),
        password: password_hash.to_string(),
        profile_image_url: None,
        brownie_points: points,
        tier_level: druk_core::points::tier_for_points(points),
        is_digital_resident: false,
        nft_id: Some("nft_1_abcdefghi".to_string()),
        created_at: now,
        updated_at: now,
    }
}

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
}

#[tokio::test]
async fn health_is_served_outside_api_prefix() {
    let (status, body) = send(state(empty_db()), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn malformed_json_is_invalid_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(state(empty_db()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "Invalid request data");
}

#[tokio::test]
async fn register_with_bad_email_is_rejected() {
    let payload = json!({
        "email": "nope",
        "password": "secret",
        "firstName": "Tashi",
        "lastName": "Dorji"
    });

    let (status, body) = send(
        state(empty_db()),
        with_json("POST", "/api/auth/register", &payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid request data");
}

#[tokio::test]
async fn register_duplicate_email_conflicts() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[count_row(1)]])
        .into_connection();
    let payload = json!({
        "email": "tashi@druk.bt",
        "password": "secret",
        "firstName": "Tashi",
        "lastName": "Dorji"
    });

    let (status, body) = send(state(db), with_json("POST", "/api/auth/register", &payload)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");
}

#[tokio::test]
async fn register_returns_created_user_without_password() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[count_row(0)]])
        .append_query_results([[user(1, 0, "$argon2id$stored")]])
        .into_connection();
    let payload = json!({
        "email": "tashi@druk.bt",
        "password": "secret",
        "firstName": "Tashi",
        "lastName": "Dorji"
    });

    let state = state(db);
    let pool = Arc::clone(&state.db);
    let (status, body) = send(state, with_json("POST", "/api/auth/register", &payload)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "tashi@druk.bt");
    assert_eq!(body["browniePoints"], 0);
    assert_eq!(body["tierLevel"], 1);
    assert!(body.get("password").is_none());

    // One email lookup, then the insert.
    let log = transaction_log(pool);
    assert_eq!(log.matches("num_items").count(), 1);
    assert!(log.contains("INSERT INTO"));
}

#[tokio::test]
async fn login_checks_password() {
    let hash = hash_password("kuzuzangpo").unwrap();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[user(1, 0, &hash)]])
        .into_connection();
    let good = json!({"email": "tashi@druk.bt", "password": "kuzuzangpo"});
    let (status, body) = send(state(db), with_json("POST", "/api/auth/login", &good)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[user(1, 0, &hash)]])
        .into_connection();
    let bad = json!({"email": "tashi@druk.bt", "password": "wrong"});
    let (status, body) = send(state(db), with_json("POST", "/api/auth/login", &bad)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn login_unknown_email_is_unauthorized() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<users::Model>::new()])
        .into_connection();
    let payload = json!({"email": "ghost@druk.bt", "password": "x"});

    let (status, _) = send(state(db), with_json("POST", "/api/auth/login", &payload)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<users::Model>::new()])
        .into_connection();

    let (status, body) = send(state(db), get("/api/users/99")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn non_numeric_id_is_invalid_request() {
    let (status, body) = send(state(empty_db()), get("/api/users/abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid request data");
}

#[tokio::test]
async fn user_tier_summary() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[user(1, 2450, "")]])
        .into_connection();

    let (status, body) = send(state(db), get("/api/users/1/tier")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tierLevel"], 3);
    assert_eq!(body["tierName"], "Mountain Dragon");
    assert_eq!(body["progressPercent"], 45);
    assert_eq!(body["pointsToNextTier"], 550);
}

#[tokio::test]
async fn unknown_residency_status_is_rejected_before_db() {
    let payload = json!({"status": "archived"});

    let (status, body) = send(
        state(empty_db()),
        with_json("PATCH", "/api/residency/applications/1/status", &payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

struct RecordingMinter {
    calls: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl NftMinter for RecordingMinter {
    async fn mint(&self, to_address: &str, token_id: &str) -> Result<MintReceipt, MintError> {
        self.calls
            .lock()
            .unwrap()
            .push((to_address.to_string(), token_id.to_string()));
        Ok(MintReceipt {
            tx_hash: "0xfeed".to_string(),
        })
    }
}

fn application(status: &str) -> residency_applications::Model {
    residency_applications::Model {
        id: 1,
        user_id: 1,
        first_name: "Tashi".to_string(),
        last_name: "Dorji".to_string(),
        email: "tashi@druk.bt".to_string(),
        country_of_origin: "India".to_string(),
        reason_for_residency: "Study".to_string(),
        status: status.to_string(),
        reviewed_by: Some(1),
        reviewed_at: None,
        created_at: Utc::now().into(),
    }
}

#[tokio::test]
async fn approval_with_wallet_mints_resident_token() {
    let mut resident = user(1, 0, "");
    resident.is_digital_resident = true;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[application("pending")]])
        .append_query_results([[application("approved")]])
        .append_query_results([[user(1, 0, "")]])
        .append_query_results([[resident]])
        .into_connection();
    let minter = Arc::new(RecordingMinter {
        calls: Mutex::new(Vec::new()),
    });
    let state = state(db).with_minter(minter.clone());
    let wallet = "0x52908400098527886E0F7030069857D2E4169EE7";
    let payload = json!({"status": "approved", "walletAddress": wallet});

    let (status, body) = send(
        state,
        with_json("PATCH", "/api/residency/applications/1/status", &payload),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");
    assert_eq!(body["mintTxHash"], "0xfeed");

    let calls = minter.calls.lock().unwrap();
    assert_eq!(
        calls.as_slice(),
        &[(wallet.to_string(), "nft_1_abcdefghi".to_string())]
    );
}

#[tokio::test]
async fn invalid_wallet_is_rejected() {
    let payload = json!({"status": "approved", "walletAddress": "0x123"});

    let (status, _) = send(
        state(empty_db()),
        with_json("PATCH", "/api/residency/applications/1/status", &payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

fn job(id: i32) -> jobs::Model {
    jobs::Model {
        id,
        business_id: None,
        posted_by: 1,
        title: "Data Analyst".to_string(),
        description: "Dashboards".to_string(),
        category: "Technology".to_string(),
        experience_level: "Mid".to_string(),
        location: "Thimphu".to_string(),
        employment_type: "full-time".to_string(),
        skills: vec!["SQL".to_string()],
        is_active: true,
        created_at: Utc::now().into(),
    }
}

#[tokio::test]
async fn job_search_accepts_placeholders() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[job(1), job(2)]])
        .into_connection();

    let (status, body) = send(
        state(db),
        get("/api/jobs?category=All%20Categories&experienceLevel=Any%20Experience&keywords="),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert_eq!(body[0]["experienceLevel"], "Mid");
    assert_eq!(body[0]["skills"][0], "SQL");
}

#[tokio::test]
async fn apply_with_blank_resume_from_form_is_created() {
    let application = job_applications::Model {
        id: 3,
        job_id: 1,
        applicant_id: 1,
        cover_letter: None,
        resume_url: None,
        status: "pending".to_string(),
        applied_at: Utc::now().into(),
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[job(1)]])
        .append_query_results([[application]])
        .into_connection();
    // The application form posts empty strings for untouched fields.
    let payload = json!({"coverLetter": "", "resumeUrl": "", "applicantId": 1});

    let state = state(db);
    let pool = Arc::clone(&state.db);
    let (status, body) = send(state, with_json("POST", "/api/jobs/1/apply", &payload)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["resumeUrl"], Json::Null);

    let log = transaction_log(pool);
    assert!(log.contains("INSERT INTO"));
    assert!(!log.contains("String(Some(\"\"))"));
}

#[tokio::test]
async fn apply_with_malformed_resume_url_is_rejected() {
    let payload = json!({"resumeUrl": "not a link"});

    let (status, body) = send(
        state(empty_db()),
        with_json("POST", "/api/jobs/1/apply", &payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid request data");
}

fn product(reward: i32) -> products::Model {
    products::Model {
        id: 1,
        seller_id: 1,
        name: "Yak cheese".to_string(),
        description: "Chhurpi from Bumthang".to_string(),
        price: dec!(120.00),
        image_url: None,
        category: "Food".to_string(),
        brownie_points_reward: reward,
        in_stock: true,
        created_at: Utc::now().into(),
    }
}

#[tokio::test]
async fn products_carry_reward_badge() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[product(50), product(0)]])
        .into_connection();

    let (status, body) = send(state(db), get("/api/products")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["rewardBadge"], "+50 Points");
    assert_eq!(body[1]["rewardBadge"], Json::Null);
    assert_eq!(body[0]["browniePointsReward"], 50);
}

#[tokio::test]
async fn product_with_zero_reward_is_created() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[product(0)]])
        .into_connection();
    let payload = json!({
        "name": "Yak cheese",
        "description": "Chhurpi from Bumthang",
        "price": "120.00",
        "category": "Food",
        "browniePointsReward": 0
    });

    let (status, body) = send(state(db), with_json("POST", "/api/products", &payload)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["rewardBadge"], Json::Null);
}

#[tokio::test]
async fn product_with_negative_price_is_rejected() {
    let payload = json!({
        "name": "Yak cheese",
        "description": "Chhurpi",
        "price": "-1",
        "category": "Food"
    });

    let (status, _) = send(
        state(empty_db()),
        with_json("POST", "/api/products", &payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn completing_unknown_activity_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<cultural_activities::Model>::new()])
        .into_connection();

    let (status, _) = send(
        state(db),
        with_json(
            "POST",
            "/api/cultural/activities/9/complete",
            &json!({"userId": 1}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn completing_activity_returns_new_tier() {
    let activity = cultural_activities::Model {
        id: 2,
        title: "Archery".to_string(),
        description: "The national sport".to_string(),
        activity_type: "learning_module".to_string(),
        content: json!({"sections": []}),
        points_reward: 600,
        image_url: None,
        difficulty: "beginner".to_string(),
        is_active: true,
        created_at: Utc::now().into(),
    };
    let completion = user_activities::Model {
        id: 1,
        user_id: 1,
        activity_id: 2,
        score: None,
        points_earned: 600,
        completed_at: Utc::now().into(),
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[activity]])
        .append_query_results([[user(1, 500, "")]])
        .append_query_results([[user(1, 1100, "")]])
        .append_query_results([[completion]])
        .into_connection();

    let (status, body) = send(
        state(db),
        with_json("POST", "/api/cultural/activities/2/complete", &json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completion"]["pointsEarned"], 600);
    assert_eq!(body["tier"]["browniePoints"], 1100);
    assert_eq!(body["tier"]["tierLevel"], 2);
}

#[tokio::test]
async fn dashboard_stats_on_empty_platform() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[count_row(0)]])
        .append_query_results([[count_row(0)]])
        .append_query_results([[BTreeMap::from([("total", Value::BigInt(None))])]])
        .into_connection();

    let (status, body) = send(state(db), get("/api/dashboard/stats")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalResidents"], 0);
    assert_eq!(body["totalBusinesses"], 0);
    assert_eq!(body["totalBrowniePoints"], 0);
    assert_eq!(body["satisfactionRate"], 94);
}

#[tokio::test]
async fn dashboard_stats_reports_totals() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[count_row(4)]])
        .append_query_results([[count_row(2)]])
        .append_query_results([[BTreeMap::from([("total", Value::BigInt(Some(7_300)))])]])
        .into_connection();

    let (status, body) = send(state(db), get("/api/dashboard/stats")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalResidents"], 4);
    assert_eq!(body["totalBusinesses"], 2);
    assert_eq!(body["totalBrowniePoints"], 7_300);
}

#[tokio::test]
async fn mini_apps_are_listed() {
    let app = mini_apps::Model {
        id: 1,
        name: "Druk Pay".to_string(),
        description: "Payments".to_string(),
        developer: "GovTech".to_string(),
        version: "2.1.0".to_string(),
        price: Decimal::ZERO,
        rating: dec!(4.80),
        downloads: 15_000,
        active: true,
        code_hash: "0xabc".to_string(),
        permissions: json!(["wallet", "identity"]),
        verified: true,
        created_at: Utc::now().into(),
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[app]])
        .into_connection();

    let (status, body) = send(state(db), get("/api/mini-apps")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Druk Pay");
    assert_eq!(body[0]["downloads"], 15_000);
    assert_eq!(body[0]["permissions"][1], "identity");
}

#[tokio::test]
async fn government_services_are_listed() {
    let service = government_services::Model {
        id: 1,
        service_name: "Business License".to_string(),
        description: "Register a trade license".to_string(),
        department: "Ministry of Economic Affairs".to_string(),
        contract_address: None,
        is_active: true,
        required_credentials: json!(["Digital Residency"]),
        processing_time: Some("3-5 business days".to_string()),
        fee: dec!(100.00),
        created_at: Utc::now().into(),
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[service]])
        .into_connection();

    let (status, body) = send(state(db), get("/api/government-services")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["serviceName"], "Business License");
    assert_eq!(body[0]["requiredCredentials"][0], "Digital Residency");
}
