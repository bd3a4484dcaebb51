use chrono::{Duration, Utc};
use http_body_util::BodyExt;

use axum::{
    body::Body,
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
            ACCESS_CONTROL_REQUEST_METHOD, AUTHORIZATION, CONTENT_TYPE, COOKIE, ORIGIN,
            SET_COOKIE,
        },
        HeaderMap, Method, Request, StatusCode,
    },
    Router,
};
use serde_json::{json, Value};
use skylab_api::{build_router, AppState};
use skylab_config::{AuthConfig, DatabaseConfig};
use skylab_database::{initialize_database, time};
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

type TestResult<T = ()> = anyhow::Result<T>;

const CURRENT_YEAR: i64 = 3000;
const PAST_YEAR: i64 = 2000;

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Value,
}

struct TestContext {
    _temp_dir: TempDir,
    pool: SqlitePool,
    state: AppState,
}

impl TestContext {
    async fn new() -> TestResult<Self> {
        let temp_dir = TempDir::new()?;
        let db_path = temp_dir.path().join("api.sqlite");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: 5,
        };

        let pool = initialize_database(&config).await?;
        let state = AppState::new(pool.clone(), &AuthConfig::default());

        Ok(Self {
            _temp_dir: temp_dir,
            pool,
            state,
        })
    }

    /// Context with a cohort running now and a finished one before it.
    async fn with_cohorts() -> TestResult<Self> {
        let ctx = Self::new().await?;
        let now = Utc::now();
        ctx.insert_cohort(
            PAST_YEAR,
            now - Duration::days(400),
            now - Duration::days(200),
        )
        .await?;
        ctx.insert_cohort(
            CURRENT_YEAR,
            now - Duration::days(30),
            now + Duration::days(30),
        )
        .await?;
        Ok(ctx)
    }

    fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    async fn insert_cohort(
        &self,
        year: i64,
        start: chrono::DateTime<Utc>,
        end: chrono::DateTime<Utc>,
    ) -> TestResult<()> {
        sqlx::query("INSERT INTO cohorts (academic_year, start_date, end_date) VALUES (?, ?, ?)")
            .bind(year)
            .bind(time::format(start))
            .bind(time::format(end))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResult<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await?.to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok(TestResponse {
            status,
            headers,
            body,
        })
    }

    async fn create_mentor(&self, email: &str, password: &str) -> TestResult<TestResponse> {
        self.send(
            Method::POST,
            "/mentors",
            Some(json!({ "user": { "email": email, "password": password, "name": "Mentor" } })),
            None,
        )
        .await
    }

    /// Log in and return the `token=...` pair to send back as a cookie.
    async fn login(&self, email: &str, password: &str) -> TestResult<String> {
        let response = self
            .send(
                Method::POST,
                &format!("/users/{email}"),
                Some(json!({ "password": password })),
                None,
            )
            .await?;
        assert_eq!(response.status, StatusCode::OK);

        let set_cookie = response
            .headers
            .get(SET_COOKIE)
            .ok_or_else(|| anyhow::anyhow!("login did not set a cookie"))?
            .to_str()?;
        let pair = set_cookie.split(';').next().unwrap_or_default();
        Ok(pair.trim().to_string())
    }

    async fn create_deadline(&self, name: &str) -> TestResult<i64> {
        let response = self
            .send(
                Method::POST,
                "/deadlines",
                Some(json!({
                    "deadline": {
                        "cohortYear": CURRENT_YEAR,
                        "name": name,
                        "dueBy": "2030-06-01T12:00:00Z",
                        "type": "Milestone"
                    }
                })),
                None,
            )
            .await?;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.body["deadline"]["id"]
            .as_i64()
            .ok_or_else(|| anyhow::anyhow!("deadline id missing"))
    }
}

#[tokio::test]
async fn health_check_reports_ok() -> TestResult {
    let ctx = TestContext::new().await?;

    let response = ctx.send(Method::GET, "/health", None, None).await?;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert!(response.body["timestamp"].is_string());
    Ok(())
}

#[tokio::test]
async fn duplicate_mentor_is_rejected() -> TestResult {
    let ctx = TestContext::with_cohorts().await?;

    let first = ctx.create_mentor("alice@example.com", "secret").await?;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["cohortYear"], CURRENT_YEAR);
    assert_eq!(first.body["user"]["email"], "alice@example.com");
    assert!(first.body["user"].get("passwordHash").is_none());

    let second = ctx.create_mentor("alice@example.com", "secret").await?;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.body["error"], "User is not unique");
    Ok(())
}

#[tokio::test]
async fn mentor_without_email_is_rejected() -> TestResult {
    let ctx = TestContext::with_cohorts().await?;

    let missing_user = ctx
        .send(Method::POST, "/mentors", Some(json!({})), None)
        .await?;
    assert_eq!(missing_user.status, StatusCode::BAD_REQUEST);

    let missing_email = ctx
        .send(
            Method::POST,
            "/mentors",
            Some(json!({ "user": { "name": "Nobody" } })),
            None,
        )
        .await?;
    assert_eq!(missing_email.status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn mentor_batch_with_duplicate_creates_nothing() -> TestResult {
    let ctx = TestContext::with_cohorts().await?;

    let response = ctx
        .send(
            Method::POST,
            "/mentors/batch",
            Some(json!({
                "users": [
                    { "email": "one@example.com" },
                    { "email": "two@example.com" },
                    { "email": "one@example.com" }
                ]
            })),
            None,
        )
        .await?;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let mentors = ctx.send(Method::GET, "/mentors", None, None).await?;
    assert_eq!(mentors.status, StatusCode::OK);
    assert_eq!(mentors.body, json!([]));

    let users = ctx.send(Method::GET, "/users", None, None).await?;
    assert_eq!(users.body, json!([]));
    Ok(())
}

#[tokio::test]
async fn mentor_batch_creates_every_mentor() -> TestResult {
    let ctx = TestContext::with_cohorts().await?;

    let response = ctx
        .send(
            Method::POST,
            "/mentors/batch",
            Some(json!({
                "users": [
                    { "email": "one@example.com" },
                    { "email": "two@example.com" }
                ]
            })),
            None,
        )
        .await?;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().map(Vec::len), Some(2));

    let mentor = ctx
        .send(Method::GET, "/mentors/two@example.com", None, None)
        .await?;
    assert_eq!(mentor.status, StatusCode::OK);
    assert_eq!(mentor.body["user"]["email"], "two@example.com");

    let missing = ctx
        .send(Method::GET, "/mentors/three@example.com", None, None)
        .await?;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn get_user_requires_token() -> TestResult {
    let ctx = TestContext::with_cohorts().await?;
    ctx.create_mentor("bob@example.com", "hunter2").await?;

    let anonymous = ctx
        .send(Method::GET, "/users/bob@example.com", None, None)
        .await?;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let cookie = ctx.login("bob@example.com", "hunter2").await?;
    let authed = ctx
        .send(Method::GET, "/users/bob@example.com", None, Some(&cookie))
        .await?;
    assert_eq!(authed.status, StatusCode::OK);
    assert_eq!(authed.body["email"], "bob@example.com");

    let forged = ctx
        .send(
            Method::GET,
            "/users/bob@example.com",
            None,
            Some("token=not-a-jwt"),
        )
        .await?;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn bearer_header_is_accepted() -> TestResult {
    let ctx = TestContext::with_cohorts().await?;
    ctx.create_mentor("carol@example.com", "pw").await?;
    let cookie = ctx.login("carol@example.com", "pw").await?;
    let token = cookie.trim_start_matches("token=");

    let request = Request::builder()
        .method(Method::GET)
        .uri("/users/carol@example.com")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())?;
    let response = ctx.router().oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn login_sets_http_only_cookie() -> TestResult {
    let ctx = TestContext::with_cohorts().await?;
    ctx.create_mentor("dave@example.com", "pw").await?;

    let response = ctx
        .send(
            Method::POST,
            "/users/dave@example.com",
            Some(json!({ "password": "pw" })),
            None,
        )
        .await?;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "dave@example.com");
    let set_cookie = response
        .headers
        .get(SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Path=/"));
    assert!(!set_cookie.contains("Max-Age"));
    Ok(())
}

#[tokio::test]
async fn login_rejects_bad_credentials() -> TestResult {
    let ctx = TestContext::with_cohorts().await?;
    ctx.create_mentor("erin@example.com", "right").await?;

    let wrong = ctx
        .send(
            Method::POST,
            "/users/erin@example.com",
            Some(json!({ "password": "wrong" })),
            None,
        )
        .await?;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body["error"], "Password is incorrect");
    assert!(wrong.headers.get(SET_COOKIE).is_none());

    let missing = ctx
        .send(
            Method::POST,
            "/users/erin@example.com",
            Some(json!({})),
            None,
        )
        .await?;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.body["error"], "Missing request parameters");

    let unknown = ctx
        .send(
            Method::POST,
            "/users/nobody@example.com",
            Some(json!({ "password": "right" })),
            None,
        )
        .await?;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn role_data_is_limited_to_current_cohort() -> TestResult {
    let ctx = TestContext::with_cohorts().await?;
    ctx.create_mentor("frank@example.com", "pw").await?;
    ctx.create_mentor("grace@example.com", "pw").await?;

    // grace only mentored in the past cohort
    sqlx::query(
        "UPDATE mentors SET cohort_year = ? WHERE user_id = (SELECT id FROM users WHERE email = ?)",
    )
    .bind(PAST_YEAR)
    .bind("grace@example.com")
    .execute(&ctx.pool)
    .await?;

    let response = ctx.send(Method::GET, "/users", None, None).await?;
    assert_eq!(response.status, StatusCode::OK);

    let users = response.body.as_array().cloned().unwrap_or_default();
    let find = |email: &str| {
        users
            .iter()
            .find(|user| user["email"] == email)
            .cloned()
            .unwrap_or(Value::Null)
    };
    assert_eq!(find("frank@example.com")["mentor"]["cohortYear"], CURRENT_YEAR);
    assert!(find("grace@example.com")["mentor"].is_null());

    let cookie = ctx.login("grace@example.com", "pw").await?;
    let single = ctx
        .send(Method::GET, "/users/grace@example.com", None, Some(&cookie))
        .await?;
    assert_eq!(single.status, StatusCode::OK);
    assert!(single.body["mentor"].is_null());
    Ok(())
}

#[tokio::test]
async fn update_and_delete_user() -> TestResult {
    let ctx = TestContext::with_cohorts().await?;
    ctx.create_mentor("heidi@example.com", "old").await?;

    let updated = ctx
        .send(
            Method::PUT,
            "/users/heidi@example.com",
            Some(json!({ "user": { "name": "Heidi", "password": "new" } })),
            None,
        )
        .await?;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["name"], "Heidi");

    ctx.login("heidi@example.com", "new").await?;

    let missing = ctx
        .send(Method::PUT, "/users/heidi@example.com", Some(json!({})), None)
        .await?;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);

    let deleted = ctx
        .send(Method::DELETE, "/users/heidi@example.com", None, None)
        .await?;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["email"], "heidi@example.com");

    let again = ctx
        .send(Method::DELETE, "/users/heidi@example.com", None, None)
        .await?;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn cohort_lifecycle() -> TestResult {
    let ctx = TestContext::new().await?;

    let none = ctx.send(Method::GET, "/cohorts/latest", None, None).await?;
    assert_eq!(none.status, StatusCode::NOT_FOUND);

    let cohort = json!({
        "cohort": {
            "academicYear": 2024,
            "startDate": "2024-05-01T00:00:00Z",
            "endDate": "2024-08-31T00:00:00Z"
        }
    });
    let created = ctx
        .send(Method::POST, "/cohorts", Some(cohort.clone()), None)
        .await?;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.body["academicYear"], 2024);

    let duplicate = ctx.send(Method::POST, "/cohorts", Some(cohort), None).await?;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);

    let incomplete = ctx
        .send(
            Method::POST,
            "/cohorts",
            Some(json!({ "cohort": { "academicYear": 2025 } })),
            None,
        )
        .await?;
    assert_eq!(incomplete.status, StatusCode::BAD_REQUEST);
    assert_eq!(incomplete.body["error"], "Parameters missing from request");

    let latest = ctx.send(Method::GET, "/cohorts/latest", None, None).await?;
    assert_eq!(latest.body["academicYear"], 2024);

    let edited = ctx
        .send(
            Method::PUT,
            "/cohorts/2024",
            Some(json!({ "cohort": { "endDate": "2024-09-30T00:00:00Z" } })),
            None,
        )
        .await?;
    assert_eq!(edited.status, StatusCode::OK);
    assert_eq!(edited.body["endDate"], "2024-09-30T00:00:00.000Z");

    let no_body = ctx
        .send(Method::PUT, "/cohorts/2024", Some(json!({})), None)
        .await?;
    assert_eq!(no_body.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_body.body["error"], "Parameters missing from request body");

    let deleted = ctx.send(Method::DELETE, "/cohorts/2024", None, None).await?;
    assert_eq!(deleted.status, StatusCode::OK);

    let list = ctx.send(Method::GET, "/cohorts", None, None).await?;
    assert_eq!(list.body, json!([]));
    Ok(())
}

#[tokio::test]
async fn unknown_cohort_returns_404() -> TestResult {
    let ctx = TestContext::new().await?;

    let response = ctx.send(Method::DELETE, "/cohorts/1999", None, None).await?;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let edit = ctx
        .send(
            Method::PUT,
            "/cohorts/1999",
            Some(json!({ "cohort": { "endDate": "2030-01-01T00:00:00Z" } })),
            None,
        )
        .await?;
    assert_eq!(edit.status, StatusCode::NOT_FOUND);

    let not_a_number = ctx.send(Method::DELETE, "/cohorts/abc", None, None).await?;
    assert_eq!(not_a_number.status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn unknown_deadline_returns_404() -> TestResult {
    let ctx = TestContext::with_cohorts().await?;

    let response = ctx.send(Method::GET, "/deadlines/42", None, None).await?;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let questions = ctx
        .send(Method::GET, "/deadlines/42/questions", None, None)
        .await?;
    assert_eq!(questions.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn deadline_crud_and_filters() -> TestResult {
    let ctx = TestContext::with_cohorts().await?;
    let id = ctx.create_deadline("Milestone 1").await?;
    ctx.create_deadline("Milestone 2").await?;

    let duplicate = ctx
        .send(
            Method::POST,
            "/deadlines",
            Some(json!({
                "deadline": {
                    "cohortYear": CURRENT_YEAR,
                    "name": "Milestone 1",
                    "dueBy": "2030-06-01T12:00:00Z"
                }
            })),
            None,
        )
        .await?;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);

    let unknown_cohort = ctx
        .send(
            Method::POST,
            "/deadlines",
            Some(json!({
                "deadline": { "cohortYear": 1234, "name": "Orphan", "dueBy": "2030-06-01T12:00:00Z" }
            })),
            None,
        )
        .await?;
    assert_eq!(unknown_cohort.status, StatusCode::BAD_REQUEST);

    let filtered = ctx
        .send(Method::GET, "/deadlines?name=Milestone%202", None, None)
        .await?;
    assert_eq!(filtered.status, StatusCode::OK);
    assert_eq!(filtered.body["deadlines"].as_array().map(Vec::len), Some(1));

    let by_year = ctx
        .send(
            Method::GET,
            &format!("/deadlines?cohortYear={CURRENT_YEAR}"),
            None,
            None,
        )
        .await?;
    assert_eq!(by_year.body["deadlines"].as_array().map(Vec::len), Some(2));

    let bad_year = ctx
        .send(Method::GET, "/deadlines?cohortYear=soon", None, None)
        .await?;
    assert_eq!(bad_year.status, StatusCode::BAD_REQUEST);

    let updated = ctx
        .send(
            Method::PUT,
            &format!("/deadlines/{id}"),
            Some(json!({ "deadline": { "desc": "First milestone", "type": "Evaluation" } })),
            None,
        )
        .await?;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["deadline"]["desc"], "First milestone");
    assert_eq!(updated.body["deadline"]["type"], "Evaluation");

    let deleted = ctx
        .send(Method::DELETE, &format!("/deadlines/{id}"), None, None)
        .await?;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["deadline"]["id"], id);

    let gone = ctx
        .send(Method::GET, &format!("/deadlines/{id}"), None, None)
        .await?;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn replacing_questions_drops_previous_set() -> TestResult {
    let ctx = TestContext::with_cohorts().await?;
    let id = ctx.create_deadline("Evaluation 1").await?;
    let uri = format!("/deadlines/{id}/questions");

    let first = ctx
        .send(
            Method::PUT,
            &uri,
            Some(json!({
                "questions": [
                    { "questionNumber": 1, "question": "Name?", "type": "ShortAnswer" },
                    { "questionNumber": 2, "question": "Pick", "type": "MultipleChoice", "options": ["a", "b"] },
                    { "questionNumber": 3, "question": "Thoughts", "type": "Paragraph" }
                ]
            })),
            None,
        )
        .await?;
    assert_eq!(first.status, StatusCode::OK, "{}", first.body);
    assert_eq!(
        first.body["deadline"]["questions"].as_array().map(Vec::len),
        Some(3)
    );

    let second = ctx
        .send(
            Method::PUT,
            &uri,
            Some(json!({
                "questions": [
                    { "questionNumber": 1, "question": "Only one", "type": "Paragraph", "isAnonymous": true }
                ]
            })),
            None,
        )
        .await?;
    assert_eq!(second.status, StatusCode::OK);

    let fetched = ctx.send(Method::GET, &uri, None, None).await?;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["name"], "Evaluation 1");
    let questions = fetched.body["questions"].as_array().cloned().unwrap_or_default();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0]["question"], "Only one");
    assert_eq!(questions[0]["isAnonymous"], true);

    let duplicate_numbers = ctx
        .send(
            Method::PUT,
            &uri,
            Some(json!({
                "questions": [
                    { "questionNumber": 1, "question": "A", "type": "Paragraph" },
                    { "questionNumber": 1, "question": "B", "type": "Paragraph" }
                ]
            })),
            None,
        )
        .await?;
    assert_eq!(duplicate_numbers.status, StatusCode::BAD_REQUEST);

    let still_one = ctx.send(Method::GET, &uri, None, None).await?;
    assert_eq!(still_one.body["questions"].as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn unsupported_methods_return_400() -> TestResult {
    let ctx = TestContext::with_cohorts().await?;

    for (method, uri) in [
        (Method::PATCH, "/users"),
        (Method::PATCH, "/users/someone@example.com"),
        (Method::DELETE, "/mentors"),
        (Method::PUT, "/mentors/someone@example.com"),
        (Method::POST, "/cohorts/latest"),
        (Method::DELETE, "/deadlines"),
        (Method::POST, "/deadlines/1"),
    ] {
        let response = ctx.send(method.clone(), uri, None, None).await?;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{method} {uri}");
        assert_eq!(response.body["error"], "Invalid method to access endpoint");
    }
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() -> TestResult {
    let ctx = TestContext::with_cohorts().await?;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/cohorts")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))?;
    let response = ctx.router().oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn openapi_document_is_served() -> TestResult {
    let ctx = TestContext::new().await?;

    let response = ctx
        .send(Method::GET, "/api-docs/openapi.json", None, None)
        .await?;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["paths"]["/deadlines/{deadlineId}/questions"].is_object());
    assert!(response.body["components"]["securitySchemes"]["cookieAuth"].is_object());
    Ok(())
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() -> TestResult {
    let ctx = TestContext::new().await?;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/cohorts")
        .header(ORIGIN, "http://localhost:3000")
        .header(ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .body(Body::empty())?;
    let response = ctx.router().oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
    let methods = response
        .headers()
        .get(ACCESS_CONTROL_ALLOW_METHODS)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    assert!(methods.contains("PUT"));
    Ok(())
}
