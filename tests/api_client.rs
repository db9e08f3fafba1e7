use admin_console::api::{
    AdminActionService, AdminApiClient, ApiActionService, ApiAuthService, ApiListSource,
    ApiNotificationService, AppConfig, AuthService, ListQuery, ListSource, NotificationService,
};
use admin_console::{
    AdminError, ApiError, FilterKey, FilterState, NotificationDraft, ResourceKind, Session,
    SessionEnd, SessionStatus,
};
use axum::{
    extract::{Query, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    authorization: Option<String>,
    query: Vec<(String, String)>,
}

type Log = Arc<Mutex<Vec<Recorded>>>;

fn record(log: &Log, method: Method, uri: &Uri, headers: &HeaderMap, query: Vec<(String, String)>) {
    log.lock().unwrap().push(Recorded {
        method,
        path: uri.path().to_string(),
        authorization: headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        query,
    });
}

async fn deposits(
    State(log): State<Log>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
) -> Json<Value> {
    record(&log, method, &uri, &headers, query);
    Json(json!({
        "content": [{"id": 1, "username": "alice", "amount": "50", "status": "PENDING"}],
        "number": 0,
        "totalPages": 3,
        "totalElements": 45,
        "size": 20
    }))
}

async fn recorded_ok(
    State(log): State<Log>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
) -> StatusCode {
    record(&log, method, &uri, &headers, query);
    StatusCode::OK
}

async fn tickets(
    State(log): State<Log>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
) -> Json<Value> {
    record(&log, method, &uri, &headers, query);
    Json(json!([
        {"id": 1, "subject": "Login", "username": "alice", "status": "OPEN"},
        {"id": 2, "subject": "Payout", "username": "bob", "status": "CLOSED"},
        {"id": 3, "subject": "Bonus", "username": "carol", "status": "OPEN"}
    ]))
}

async fn login(Json(body): Json<Value>) -> Json<Value> {
    let username = body["usernameOrPhone"].as_str().unwrap_or_default().to_string();
    let role = if username == "admin" { "ADMIN" } else { "USER" };
    Json(json!({
        "token": format!("token-{}", username),
        "user": {"id": 1, "username": username, "fullName": "Site Admin", "email": "admin@example.com", "role": role}
    }))
}

async fn slow() -> StatusCode {
    tokio::time::sleep(Duration::from_secs(3)).await;
    StatusCode::OK
}

fn app(log: Log) -> Router {
    Router::new()
        .route("/api/admin/deposits/filtered", get(deposits))
        .route(
            "/api/admin/withdrawals/filtered",
            get(|| async { (StatusCode::UNAUTHORIZED, "expired") }),
        )
        .route(
            "/api/admin/users",
            get(|| async {
                (
                    StatusCode::FORBIDDEN,
                    Json(json!({"error": "USER_BANNED", "banReason": "fraud"})),
                )
                    .into_response()
            }),
        )
        .route(
            "/api/community/messages",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/api/admin/deposits/:id/confirm", put(recorded_ok))
        .route("/api/admin/users/:id/ban", post(recorded_ok))
        .route(
            "/api/admin/withdrawals/:id/reject",
            put(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"message": "Already processed"})),
                )
            }),
        )
        .route("/api/admin/notifications/unread-count", get(|| async { Json(json!(3)) }))
        .route("/api/auth/login", post(login))
        .route("/api/support/admin/tickets", get(tickets))
        .route("/api/support/admin/tickets/:id/status", put(recorded_ok))
        .route("/api/admin/notifications/broadcast", post(recorded_ok))
        .route("/api/admin/plans/:id/toggle-status", put(recorded_ok))
        .route("/api/admin/notifications", get(slow))
        .with_state(log)
}

async fn spawn_server() -> (String, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app(log.clone());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{}/api", addr), log)
}

fn client(base_url: &str, session: Arc<Session>) -> Arc<AdminApiClient> {
    let config = AppConfig {
        api_base_url: base_url.to_string(),
        request_timeout_secs: 1,
        ..AppConfig::default()
    };
    Arc::new(AdminApiClient::new(&config, session).unwrap())
}

fn pairs(values: &[(&str, &str)]) -> Vec<(String, String)> {
    values
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn list_request_sends_bearer_and_omits_empty_filters() {
    let (base_url, log) = spawn_server().await;
    let session = Arc::new(Session::with_token("abc"));
    let source = ApiListSource::new(client(&base_url, session));

    let query = ListQuery {
        resource: ResourceKind::Deposits,
        page: 0,
        size: 20,
        filters: FilterState::new()
            .with(FilterKey::Status, "PENDING")
            .with(FilterKey::Username, "  "),
    };
    let page = source.fetch_page(&query).await.unwrap();

    assert_eq!(page.content.len(), 1);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.total_elements, 45);

    let recorded = log.lock().unwrap().last().cloned().unwrap();
    assert_eq!(recorded.path, "/api/admin/deposits/filtered");
    assert_eq!(recorded.authorization.as_deref(), Some("Bearer abc"));
    assert_eq!(
        recorded.query,
        pairs(&[("status", "PENDING"), ("page", "0"), ("size", "20")])
    );
}

#[tokio::test]
async fn unauthorized_ends_the_session() {
    let (base_url, _) = spawn_server().await;
    let session = Arc::new(Session::with_token("stale"));
    let mut status = session.subscribe();
    let source = ApiListSource::new(client(&base_url, session.clone()));

    let query = ListQuery {
        resource: ResourceKind::Withdrawals,
        page: 0,
        size: 20,
        filters: FilterState::new(),
    };
    let err = source.fetch_page(&query).await.unwrap_err();

    assert_eq!(err, ApiError::Unauthorized);
    assert!(!session.is_authenticated());
    assert!(status.has_changed().unwrap());
    assert_eq!(
        *status.borrow_and_update(),
        SessionStatus::Ended(SessionEnd::Expired)
    );
}

#[tokio::test]
async fn unauthenticated_rejection_leaves_session_alone() {
    let (base_url, _) = spawn_server().await;
    let session = Arc::new(Session::new());
    let source = ApiListSource::new(client(&base_url, session.clone()));

    let query = ListQuery {
        resource: ResourceKind::Withdrawals,
        page: 0,
        size: 20,
        filters: FilterState::new(),
    };
    assert_eq!(
        source.fetch_page(&query).await.unwrap_err(),
        ApiError::Unauthorized
    );
    assert_eq!(session.status(), SessionStatus::SignedOut);
}

#[tokio::test]
async fn banned_account_ends_the_session_with_reason() {
    let (base_url, _) = spawn_server().await;
    let session = Arc::new(Session::with_token("abc"));
    let source = ApiListSource::new(client(&base_url, session.clone()));

    let query = ListQuery {
        resource: ResourceKind::Users,
        page: 0,
        size: 20,
        filters: FilterState::new(),
    };
    let err = source.fetch_page(&query).await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Banned {
            reason: "fraud".to_string()
        }
    );
    assert_eq!(
        err.to_string(),
        "Your account has been banned. Reason: fraud"
    );
    assert_eq!(
        session.status(),
        SessionStatus::Ended(SessionEnd::Banned {
            reason: "fraud".to_string()
        })
    );
}

#[tokio::test]
async fn server_errors_are_unexpected() {
    let (base_url, _) = spawn_server().await;
    let session = Arc::new(Session::with_token("abc"));
    let source = ApiListSource::new(client(&base_url, session.clone()));

    let query = ListQuery {
        resource: ResourceKind::CommunityMessages,
        page: 0,
        size: 50,
        filters: FilterState::new(),
    };
    let err = source.fetch_page(&query).await.unwrap_err();

    assert!(matches!(err, ApiError::Unexpected(_)));
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn actions_send_method_path_and_params() {
    let (base_url, log) = spawn_server().await;
    let session = Arc::new(Session::with_token("abc"));
    let actions = ApiActionService::new(client(&base_url, session));

    actions
        .confirm_deposit(7, Some("Confirmed by admin"))
        .await
        .unwrap();
    actions.ban_user(9, "spam", None).await.unwrap();

    let recorded = log.lock().unwrap().clone();
    assert_eq!(recorded[0].method, Method::PUT);
    assert_eq!(recorded[0].path, "/api/admin/deposits/7/confirm");
    assert_eq!(recorded[0].query, pairs(&[("notes", "Confirmed by admin")]));
    assert_eq!(recorded[1].method, Method::POST);
    assert_eq!(recorded[1].path, "/api/admin/users/9/ban");
    assert_eq!(recorded[1].query, pairs(&[("reason", "spam")]));
}

#[tokio::test]
async fn validation_errors_carry_server_message() {
    let (base_url, _) = spawn_server().await;
    let session = Arc::new(Session::with_token("abc"));
    let actions = ApiActionService::new(client(&base_url, session.clone()));

    let err = actions.reject_withdrawal(3, None).await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Validation {
            status: 400,
            message: "Already processed".to_string()
        }
    );
    assert_eq!(session.status(), SessionStatus::Active);
}

#[tokio::test]
async fn login_requires_admin_role() {
    let (base_url, _) = spawn_server().await;
    let session = Arc::new(Session::new());
    let auth = ApiAuthService::new(client(&base_url, session.clone()));

    let refused = auth.login("someone", "secret").await;
    assert!(matches!(refused, Err(AdminError::AccessDenied)));
    assert!(!session.is_authenticated());

    let admin = auth.login("admin", "secret").await.unwrap();
    assert_eq!(admin.full_name, "Site Admin");
    assert_eq!(session.token().as_deref(), Some("token-admin"));
    assert_eq!(session.current_user(), Some(admin));
    assert_eq!(session.status(), SessionStatus::Active);

    auth.logout();
    assert_eq!(
        session.status(),
        SessionStatus::Ended(SessionEnd::LoggedOut)
    );
}

#[tokio::test]
async fn unread_count_and_timeout() {
    let (base_url, _) = spawn_server().await;
    let session = Arc::new(Session::with_token("abc"));
    let notifications = ApiNotificationService::new(client(&base_url, session));

    assert_eq!(notifications.unread_count().await.unwrap(), 3);
    assert_eq!(
        notifications.latest(0, 20).await.unwrap_err(),
        ApiError::Timeout
    );
}

#[tokio::test]
async fn refused_connection_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let session = Arc::new(Session::with_token("abc"));
    let notifications =
        ApiNotificationService::new(client(&format!("http://{}/api", addr), session));

    assert!(matches!(
        notifications.unread_count().await,
        Err(ApiError::Network(_))
    ));
}

#[tokio::test]
async fn ticket_list_is_filtered_and_paged_locally() {
    let (base_url, log) = spawn_server().await;
    let session = Arc::new(Session::with_token("abc"));
    let source = ApiListSource::new(client(&base_url, session));

    let query = ListQuery {
        resource: ResourceKind::SupportTickets,
        page: 0,
        size: 20,
        filters: FilterState::new().with(FilterKey::Status, "OPEN"),
    };
    let page = source.fetch_page(&query).await.unwrap();

    assert_eq!(page.total_elements, 2);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.content[1]["subject"], json!("Bonus"));

    let recorded = log.lock().unwrap().last().cloned().unwrap();
    assert_eq!(recorded.path, "/api/support/admin/tickets");
    assert!(recorded.query.is_empty());
}

#[tokio::test]
async fn moderation_endpoints_for_tickets_plans_and_broadcasts() {
    let (base_url, log) = spawn_server().await;
    let session = Arc::new(Session::with_token("abc"));
    let actions = ApiActionService::new(client(&base_url, session));

    actions.update_ticket_status(4, "CLOSED").await.unwrap();
    actions.toggle_plan_status(2).await.unwrap();
    actions
        .broadcast_notification(&NotificationDraft::new("Maintenance", "Back at 10:00"))
        .await
        .unwrap();

    let recorded = log.lock().unwrap().clone();
    assert_eq!(recorded[0].method, Method::PUT);
    assert_eq!(recorded[0].path, "/api/support/admin/tickets/4/status");
    assert_eq!(recorded[0].query, pairs(&[("status", "CLOSED")]));
    assert_eq!(recorded[1].path, "/api/admin/plans/2/toggle-status");
    assert_eq!(recorded[2].method, Method::POST);
    assert_eq!(recorded[2].path, "/api/admin/notifications/broadcast");
    assert_eq!(
        recorded[2].query,
        pairs(&[
            ("title", "Maintenance"),
            ("message", "Back at 10:00"),
            ("type", "ADMIN_MESSAGE"),
        ])
    );
}
