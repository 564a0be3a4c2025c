//! Integration tests for `ApiClient` against a local HTTP stub.
//!
//! Each test binds a `TcpListener` on a random port, answers exactly one
//! request with a canned response, and hands back the raw request text so
//! the test can check what was sent.

use citizen_api::{ApiClient, ApiConfig, ApiError, GENERIC_ERROR_MESSAGE};
use citizen_protocol::{Credentials, RantId, Registration, UserId};
use citizen_session::{AuthRequest, Authenticator, SessionError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

// =========================================================================
// Stub server
// =========================================================================

const GRANT: &str = r#"{"token":"tok123","user":{"id":"u1","username":"alice","email":"a@x.com","level":2,"points":50}}"#;

/// Serves one response, returns (base URL, handle yielding the request).
async fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("should bind");
    let addr = listener.local_addr().expect("local addr");

    let handle = tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.expect("should accept");
        let request = read_request(&mut sock).await;
        let response = format!(
            "HTTP/1.1 {status} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        sock.write_all(response.as_bytes()).await.expect("should write");
        let _ = sock.shutdown().await;
        request
    });

    (format!("http://{addr}"), handle)
}

/// Reads headers plus `content-length` bytes of body.
async fn read_request(sock: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = sock.read(&mut chunk).await.expect("should read");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(head_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
            let body_len = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn client(base_url: String) -> ApiClient {
    ApiClient::new(&ApiConfig {
        base_url,
        ..ApiConfig::default()
    })
    .expect("should build")
}

fn credentials() -> Credentials {
    Credentials {
        email: "a@x.com".into(),
        password: "hunter2".into(),
    }
}

// =========================================================================
// login / register
// =========================================================================

#[tokio::test]
async fn test_login_success_returns_grant() {
    let (url, server) = serve_once(200, GRANT).await;

    let grant = client(url).login(&credentials()).await.expect("should succeed");

    assert_eq!(grant.token, "tok123");
    assert_eq!(grant.user.id, UserId::from("u1"));

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /api/users/login "));
    assert!(request.contains(r#""email":"a@x.com""#));
}

#[tokio::test]
async fn test_login_rejected_uses_server_error_text() {
    let (url, _server) = serve_once(401, r#"{"error":"Invalid email or password"}"#).await;

    let err = client(url).login(&credentials()).await.unwrap_err();

    assert!(matches!(err, ApiError::Rejected { status: 401, .. }));
    assert_eq!(err.user_message(), "Invalid email or password");
}

#[tokio::test]
async fn test_login_rejected_without_error_field_is_generic() {
    let (url, _server) = serve_once(500, "<html>oops</html>").await;

    let err = client(url).login(&credentials()).await.unwrap_err();

    assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_login_blank_password_not_sent() {
    // No server at all: validation must fail before any connection.
    let api = client("http://127.0.0.1:9".into());
    let creds = Credentials {
        email: "a@x.com".into(),
        password: String::new(),
    };

    let err = api.login(&creds).await.unwrap_err();

    assert!(matches!(err, ApiError::Invalid(_)));
}

#[tokio::test]
async fn test_register_posts_to_auth_register() {
    let (url, server) = serve_once(201, GRANT).await;
    let registration = Registration {
        username: "alice".into(),
        email: "a@x.com".into(),
        password: "hunter2".into(),
    };

    let grant = client(url).register(&registration).await.expect("should succeed");

    assert_eq!(grant.user.username, "alice");
    let request = server.await.unwrap();
    assert!(request.starts_with("POST /api/auth/register "));
    assert!(request.contains(r#""username":"alice""#));
}

#[tokio::test]
async fn test_login_malformed_success_body_is_decode_error() {
    let (url, _server) = serve_once(200, r#"{"token":"tok"}"#).await;

    let err = client(url).login(&credentials()).await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_request_error() {
    // Grab a free port, then close it so nothing is listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(format!("http://{addr}"))
        .login(&credentials())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Request(_)));
    assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
}

// =========================================================================
// username_available / fetch_rants
// =========================================================================

#[tokio::test]
async fn test_username_available_sends_query() {
    let (url, server) = serve_once(200, r#"{"available":false}"#).await;

    let available = client(url).username_available("alice").await.unwrap();

    assert!(!available);
    let request = server.await.unwrap();
    assert!(request.starts_with("GET /api/users/check-username?username=alice "));
}

#[tokio::test]
async fn test_fetch_rants_sends_bearer_token() {
    let body = r#"[{"id":"1","text":"Potholes","city":"New York","upvotes":15,"createdAt":100}]"#;
    let (url, server) = serve_once(200, body).await;

    let rants = client(url).fetch_rants(Some("tok123")).await.unwrap();

    assert_eq!(rants.len(), 1);
    assert_eq!(rants[0].id, RantId::from("1"));
    let request = server.await.unwrap().to_lowercase();
    assert!(request.contains("authorization: bearer tok123"));
}

// =========================================================================
// Authenticator
// =========================================================================

#[tokio::test]
async fn test_authenticator_maps_rejection_to_auth_failed() {
    let (url, _server) = serve_once(409, r#"{"error":"Username already taken"}"#).await;
    let request = AuthRequest::Register(Registration {
        username: "alice".into(),
        email: "a@x.com".into(),
        password: "pw".into(),
    });

    let err = client(url).authenticate(&request).await.unwrap_err();

    match err {
        SessionError::AuthFailed(msg) => assert_eq!(msg, "Username already taken"),
        other => panic!("expected AuthFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_authenticator_login_success() {
    let (url, _server) = serve_once(200, GRANT).await;

    let grant = client(url)
        .authenticate(&AuthRequest::Login(credentials()))
        .await
        .expect("should succeed");

    assert_eq!(grant.token, "tok123");
}
