mod common;

use common::{FakeBackend, SERVICE_KEY, TAKEN_EMAIL, TAKEN_MESSAGE, Upload};
use grocery_storefront::baas::{BaasError, NewAuthUser, SupabaseClient, UserMetadata};
use secrecy::SecretString;

fn new_user(email: &str) -> NewAuthUser {
    NewAuthUser {
        email: email.to_string(),
        password: "secretpassA1!aB2@".to_string(),
        email_confirm: true,
        user_metadata: UserMetadata {
            full_name: "Fresh Foods".to_string(),
            avatar_url: None,
        },
    }
}

#[tokio::test]
async fn creates_auth_users_with_service_key() {
    let backend = FakeBackend::default();
    let base = backend.spawn().await;
    let client = SupabaseClient::new(&format!("{base}/"), SecretString::from(SERVICE_KEY))
        .expect("client");
    assert_eq!(client.base_url(), base);

    let created = client
        .create_user(&new_user("vendor@example.com"))
        .await
        .expect("user created");
    assert_eq!(created.email.as_deref(), Some("vendor@example.com"));

    let sent = backend.created_users();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["email_confirm"], true);
    assert_eq!(sent[0]["user_metadata"]["full_name"], "Fresh Foods");
}

#[tokio::test]
async fn surfaces_backend_rejection_message() {
    let base = FakeBackend::default().spawn().await;
    let client = SupabaseClient::new(&base, SecretString::from(SERVICE_KEY)).expect("client");

    let err = client
        .create_user(&new_user(TAKEN_EMAIL))
        .await
        .expect_err("duplicate email");
    match err {
        BaasError::Api { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, TAKEN_MESSAGE);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn wrong_key_is_rejected() {
    let backend = FakeBackend::default();
    let base = backend.spawn().await;
    let client = SupabaseClient::new(&base, SecretString::from("nope")).expect("client");

    let err = client
        .create_user(&new_user("vendor@example.com"))
        .await
        .expect_err("bad key");
    assert!(matches!(err, BaasError::Api { status: 401, ref message } if message == "Invalid API key"));
    assert!(backend.created_users().is_empty());
}

#[tokio::test]
async fn uploads_objects_without_overwriting() {
    let backend = FakeBackend::default();
    let base = backend.spawn().await;
    let client = SupabaseClient::new(&base, SecretString::from(SERVICE_KEY)).expect("client");

    client
        .upload_object("avatars", "avatars/jane_1.png", vec![1, 2, 3, 4], "image/png")
        .await
        .expect("uploaded");

    assert_eq!(
        backend.uploads(),
        vec![Upload {
            path: "avatars/jane_1.png".to_string(),
            size: 4,
            upsert: Some("false".to_string()),
        }]
    );
    assert_eq!(
        client.public_url("avatars", "avatars/jane_1.png"),
        format!("{base}/storage/v1/object/public/avatars/avatars/jane_1.png")
    );

    let err = client
        .upload_object("missing", "x.png", vec![0], "image/png")
        .await
        .expect_err("unknown bucket");
    assert!(matches!(err, BaasError::Api { status: 404, ref message } if message == "Bucket not found"));
}
