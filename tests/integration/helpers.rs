//! Shared test helpers for integration tests.

use std::sync::{Arc, LazyLock};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use shelf_api::AppState;
use shelf_api::app::build_app;
use shelf_auth::{JwtDecoder, JwtEncoder, PasswordHasher, PasswordPolicy};
use shelf_core::config::ShelfConfig;
use shelf_database::repositories::{
    AccessLinkRepository, ActivityRepository, EntryRepository, QuotaRepository, ShareRepository,
    TagRepository, TokenRepository, UserRepository,
};
use shelf_database::{DatabasePool, NamespaceStore};
use shelf_service::{
    ActivityService, AuthService, FolderService, LinkService, ObjectService, QuotaService,
    SearchService, ShareService, TagService, UserService,
};

/// Password accepted by the strength policy.
pub const TEST_PASSWORD: &str = "vX9#mQ2$lZ7p";

/// Multipart boundary for upload requests.
const BOUNDARY: &str = "shelf-test-boundary";

/// All tests share one database, so they run one at a time.
static DB_GUARD: LazyLock<tokio::sync::Mutex<()>> = LazyLock::new(|| tokio::sync::Mutex::new(()));

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Blob root; the directory is removed when the app drops
    _blob_dir: TempDir,
    /// Held for the lifetime of the test
    _guard: tokio::sync::MutexGuard<'static, ()>,
}

impl TestApp {
    /// Create a new test application, or `None` when
    /// `SHELF_TEST_DATABASE_URL` is unset.
    pub async fn new() -> Option<Self> {
        let database_url = std::env::var("SHELF_TEST_DATABASE_URL").ok()?;
        let guard = DB_GUARD.lock().await;

        let blob_dir = tempfile::tempdir().expect("Failed to create blob dir");

        let mut config = ShelfConfig::default();
        config.database.url = database_url;
        config.database.max_connections = 5;
        config.auth.jwt_secret = "shelf-integration-test-secret".to_string();
        config.storage.local.root_path = blob_dir.path().display().to_string();
        config.storage.max_upload_size_bytes = 1024 * 1024;

        let database = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        let db_pool = database.pool().clone();

        shelf_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        Self::clean_database(&db_pool).await;

        let object_store = shelf_storage::connect(&config.storage)
            .await
            .expect("Failed to init storage");

        let entry_repo = Arc::new(EntryRepository::new(db_pool.clone()));
        let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
        let token_repo = Arc::new(TokenRepository::new(db_pool.clone()));
        let quota_repo = Arc::new(QuotaRepository::new(db_pool.clone()));
        let share_repo = Arc::new(ShareRepository::new(db_pool.clone()));
        let link_repo = Arc::new(AccessLinkRepository::new(db_pool.clone()));
        let tag_repo = Arc::new(TagRepository::new(db_pool.clone()));
        let activity_repo = Arc::new(ActivityRepository::new(db_pool.clone()));

        let namespace: Arc<dyn NamespaceStore> = entry_repo.clone();

        let password_hasher = Arc::new(PasswordHasher::new());
        let password_policy = Arc::new(PasswordPolicy::new(&config.auth));
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&user_repo),
            Arc::clone(&token_repo),
            Arc::clone(&password_hasher),
            Arc::clone(&password_policy),
            Arc::clone(&jwt_encoder),
            Arc::clone(&jwt_decoder),
            config.storage.default_quota_bytes,
        ));
        let user_service = Arc::new(UserService::new(
            Arc::clone(&user_repo),
            Arc::clone(&password_hasher),
            Arc::clone(&password_policy),
        ));
        let folder_service = Arc::new(FolderService::new(Arc::clone(&namespace)));
        let object_service = Arc::new(ObjectService::new(
            Arc::clone(&namespace),
            Arc::clone(&object_store),
            Arc::clone(&quota_repo),
            config.storage.clone(),
        ));
        let share_service = Arc::new(ShareService::new(
            Arc::clone(&share_repo),
            Arc::clone(&entry_repo),
            Arc::clone(&user_repo),
        ));
        let link_service = Arc::new(LinkService::new(
            Arc::clone(&link_repo),
            Arc::clone(&entry_repo),
            config.server.public_base_url.clone(),
        ));
        let tag_service = Arc::new(TagService::new(
            Arc::clone(&tag_repo),
            Arc::clone(&entry_repo),
        ));
        let quota_service = Arc::new(QuotaService::new(Arc::clone(&quota_repo)));
        let search_service = Arc::new(SearchService::new(
            Arc::clone(&entry_repo),
            Arc::clone(&tag_repo),
        ));
        let activity_service = Arc::new(ActivityService::new(
            Arc::clone(&activity_repo),
            Arc::clone(&entry_repo),
        ));

        let state = AppState {
            config: Arc::new(config),
            db_pool: db_pool.clone(),
            object_store,
            jwt_decoder,
            auth_service,
            user_service,
            folder_service,
            object_service,
            share_service,
            link_service,
            tag_service,
            quota_service,
            search_service,
            activity_service,
        };

        Some(Self {
            router: build_app(state),
            db_pool,
            _blob_dir: blob_dir,
            _guard: guard,
        })
    }

    /// Remove all rows between tests
    pub async fn clean_database(pool: &PgPool) {
        let tables = [
            "activity_log",
            "entry_tags",
            "tags",
            "access_links",
            "shares",
            "storage_entries",
            "refresh_tokens",
            "user_quotas",
            "users",
        ];

        for table in &tables {
            let query = format!("DELETE FROM {}", table);
            let _ = sqlx::query(&query).execute(pool).await;
        }
    }

    /// Register a user through the API and return their ID and access token
    pub async fn register(&self, email: &str, password: &str) -> (Uuid, String) {
        let name = email.split('@').next().unwrap_or("user");
        let body = serde_json::json!({
            "email": email,
            "name": name,
            "password": password,
        });

        let response = self
            .request("POST", "/api/auth/register", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Register failed: {:?}",
            response.body
        );

        let id = response.body["data"]["user"]["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .expect("No user id in register response");
        let token = response.body["data"]["access_token"]
            .as_str()
            .expect("No access_token in register response")
            .to_string();

        (id, token)
    }

    /// Login and return JWT access token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        let response = self
            .request("POST", "/api/auth/login", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["data"]["access_token"]
            .as_str()
            .expect("No access_token in login response")
            .to_string()
    }

    /// Upload a file through the multipart endpoint
    pub async fn upload_file(
        &self,
        token: &str,
        prefix: &str,
        file_name: &str,
        content: &[u8],
    ) -> TestResponse {
        let body = multipart_body(&[("prefix", prefix)], file_name, content);
        self.send_multipart("/api/objects/upload", token, body)
            .await
    }

    /// Upload a new version of an existing file
    pub async fn upload_version(
        &self,
        token: &str,
        entry_id: Uuid,
        file_name: &str,
        content: &[u8],
    ) -> TestResponse {
        let body = multipart_body(&[], file_name, content);
        self.send_multipart(&format!("/api/objects/{entry_id}/versions"), token, body)
            .await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Make a request and return the raw body bytes
    pub async fn request_bytes(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
    ) -> (StatusCode, Vec<u8>) {
        let mut req = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req.body(Body::empty()).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 2 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        (status, body_bytes.to_vec())
    }

    async fn send_multipart(&self, path: &str, token: &str, body: Vec<u8>) -> TestResponse {
        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 2 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// Extract `data.id` from a response body as a UUID.
pub fn entry_id(response: &TestResponse) -> Uuid {
    response.body["data"]["id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .expect("No id in response data")
}

fn multipart_body(text_fields: &[(&str, &str)], file_name: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in text_fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}
