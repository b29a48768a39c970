use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    routing::get,
};
use grocery_storefront::{
    middleware::auth::{AuthSettings, AuthUser, Claims, MaybeUser},
    storage::Identity,
};
use jsonwebtoken::{EncodingKey, Header, encode};
use secrecy::SecretString;
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &str = "test-jwt-secret";

fn settings() -> AuthSettings {
    AuthSettings::new(&SecretString::from(SECRET))
}

fn token(user_id: Uuid, aud: &str, secret: &str) -> String {
    let claims = Claims {
        sub: user_id,
        email: Some("shopper@example.com".into()),
        aud: aud.into(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("encode token")
}

async fn whoami(user: MaybeUser) -> String {
    match user.identity() {
        Identity::User(id) => id.to_string(),
        Identity::Guest(id) => format!("guest:{id}"),
    }
}

async fn me(user: AuthUser) -> String {
    user.email.unwrap_or_default()
}

fn app() -> Router {
    Router::new()
        .route("/whoami", get(whoami))
        .route("/me", get(me))
        .with_state(settings())
}

async fn call(request: Request<Body>) -> (StatusCode, String) {
    let response = app().oneshot(request).await.expect("response");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, String::from_utf8_lossy(&body).into_owned())
}

#[test]
fn verifies_tokens_for_signed_in_users() {
    let user_id = Uuid::new_v4();
    let claims = settings()
        .verify(&token(user_id, "authenticated", SECRET))
        .expect("valid token");
    assert_eq!(claims.sub, user_id);
}

#[test]
fn rejects_wrong_secret_and_audience() {
    let user_id = Uuid::new_v4();
    assert!(settings().verify(&token(user_id, "authenticated", "other")).is_err());
    assert!(settings().verify(&token(user_id, "anon", SECRET)).is_err());
    assert!(settings().verify("not-a-token").is_err());
}

#[tokio::test]
async fn bearer_header_identifies_user() {
    let user_id = Uuid::new_v4();
    let request = Request::builder()
        .uri("/whoami")
        .header(
            header::AUTHORIZATION,
            format!("Bearer {}", token(user_id, "authenticated", SECRET)),
        )
        .body(Body::empty())
        .expect("request");

    assert_eq!(call(request).await, (StatusCode::OK, user_id.to_string()));
}

#[tokio::test]
async fn session_cookie_identifies_user() {
    let user_id = Uuid::new_v4();
    let request = Request::builder()
        .uri("/whoami")
        .header(
            header::COOKIE,
            format!("sb-access-token={}", token(user_id, "authenticated", SECRET)),
        )
        .body(Body::empty())
        .expect("request");

    assert_eq!(call(request).await, (StatusCode::OK, user_id.to_string()));
}

#[tokio::test]
async fn bad_or_missing_token_falls_back_to_guest() {
    let anonymous = Request::builder()
        .uri("/whoami")
        .body(Body::empty())
        .expect("request");
    let (status, body) = call(anonymous).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("guest:"), "{body}");

    let guest_id = Uuid::new_v4();
    let forged = Request::builder()
        .uri("/whoami")
        .header(
            header::AUTHORIZATION,
            format!("Bearer {}", token(Uuid::new_v4(), "authenticated", "forged")),
        )
        .header(header::COOKIE, format!("guest_id={guest_id}"))
        .body(Body::empty())
        .expect("request");
    assert_eq!(call(forged).await, (StatusCode::OK, format!("guest:{guest_id}")));
}

#[tokio::test]
async fn guest_cookie_identifies_anonymous_caller() {
    let guest_id = Uuid::new_v4();
    let request = Request::builder()
        .uri("/whoami")
        .header(header::COOKIE, format!("theme=dark; guest_id={guest_id}"))
        .body(Body::empty())
        .expect("request");

    assert_eq!(call(request).await, (StatusCode::OK, format!("guest:{guest_id}")));
}

#[tokio::test]
async fn signed_in_user_wins_over_guest_cookie() {
    let user_id = Uuid::new_v4();
    let request = Request::builder()
        .uri("/whoami")
        .header(
            header::COOKIE,
            format!(
                "guest_id={}; sb-access-token={}",
                Uuid::new_v4(),
                token(user_id, "authenticated", SECRET)
            ),
        )
        .body(Body::empty())
        .expect("request");

    assert_eq!(call(request).await, (StatusCode::OK, user_id.to_string()));
}

#[tokio::test]
async fn required_user_rejects_anonymous_requests() {
    let request = Request::builder()
        .uri("/me")
        .body(Body::empty())
        .expect("request");
    let (status, _) = call(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
