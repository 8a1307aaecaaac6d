//! End-to-end tests for register → login → authenticated request.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use passgate_auth::{
    AuthService, AuthState, CredentialStore, MemoryCredentialStore, PasswordHasher,
    RequestContext, TokenIssuer,
};
use passgate_core::config::AuthConfig;
use passgate_core::error::{AppError, ErrorKind};
use passgate_core::result::AppResult;
use passgate_entity::Identity;

const SECRET: &str = "integration-test-secret-0123456789abcdef";

fn test_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: SECRET.to_string(),
        argon2_memory_kib: 1024,
        argon2_iterations: 1,
        argon2_parallelism: 1,
        ..AuthConfig::default()
    }
}

fn service() -> AuthService {
    AuthService::new(&test_config(), Arc::new(MemoryCredentialStore::new()))
        .expect("service builds")
}

fn tamper_signature_at(token: &str, index: usize) -> String {
    let (message, signature) = token.rsplit_once('.').expect("three segments");
    let mut chars: Vec<char> = signature.chars().collect();
    chars[index] = if chars[index] == 'A' { 'B' } else { 'A' };
    format!("{message}.{}", chars.into_iter().collect::<String>())
}

#[test]
fn test_hash_properties() {
    let hasher = PasswordHasher::new(&test_config()).unwrap();
    for p in ["pw1", "correct horse battery staple", "ünïcødé", " "] {
        let first = hasher.hash_password(p).unwrap();
        let second = hasher.hash_password(p).unwrap();
        assert!(hasher.verify_password(p, &first));
        assert_ne!(first, second, "salts must differ for {p:?}");
    }

    let digest = hasher.hash_password("pw2").unwrap();
    assert!(!hasher.verify_password("pw1", &digest));
}

#[tokio::test]
async fn test_register_then_duplicate() {
    let auth = service();
    let receipt = auth.register("alice", "pw1").await.unwrap();
    assert_eq!(receipt.username, "alice");

    let err = auth.register("alice", "pw2").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::DuplicateIdentity);

    // The first password still works; the second was never stored.
    assert!(auth.login("alice", "pw1").await.is_ok());
    assert_eq!(
        auth.login("alice", "pw2").await.unwrap_err().kind,
        ErrorKind::InvalidCredentials
    );
}

#[tokio::test]
async fn test_register_rejects_empty_input() {
    let auth = service();
    assert_eq!(
        auth.register("", "pw").await.unwrap_err().kind,
        ErrorKind::InvalidInput
    );
    assert_eq!(
        auth.register("alice", "").await.unwrap_err().kind,
        ErrorKind::InvalidInput
    );
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let auth = service();
    auth.register("alice", "pw1").await.unwrap();

    let wrong_password = auth.login("alice", "wrong").await.unwrap_err();
    let unknown_user = auth.login("bob", "anything").await.unwrap_err();

    assert_eq!(wrong_password.kind, ErrorKind::InvalidCredentials);
    assert_eq!(unknown_user.kind, ErrorKind::InvalidCredentials);
    assert_eq!(wrong_password.message, unknown_user.message);
}

#[tokio::test]
async fn test_oversized_login_password_is_invalid_credentials() {
    let auth = service();
    auth.register("alice", "pw1").await.unwrap();
    let oversized = "x".repeat(test_config().password_max_length + 1);

    let known = auth.login("alice", &oversized).await.unwrap_err();
    let unknown = auth.login("bob", &oversized).await.unwrap_err();
    let wrong = auth.login("alice", "wrong").await.unwrap_err();

    assert_eq!(known.kind, ErrorKind::InvalidCredentials);
    assert_eq!(unknown.kind, ErrorKind::InvalidCredentials);
    assert_eq!(known.message, wrong.message);
}

#[tokio::test]
async fn test_login_is_case_sensitive() {
    let auth = service();
    auth.register("alice", "pw1").await.unwrap();
    assert_eq!(
        auth.login("Alice", "pw1").await.unwrap_err().kind,
        ErrorKind::InvalidCredentials
    );
}

#[tokio::test]
async fn test_login_then_authenticate() {
    let auth = service();
    auth.register("alice", "pw1").await.unwrap();
    let login = auth.login("alice", "pw1").await.unwrap();

    let lifetime = login.expires_at - Utc::now();
    assert!(lifetime > Duration::minutes(59));
    assert!(lifetime <= Duration::seconds(3601));

    let mut ctx = RequestContext::new();
    let header = format!("Bearer {}", login.token);
    auth.authenticate_request(&mut ctx, Some(&header)).unwrap();

    assert_eq!(ctx.subject(), Some("alice"));
    assert_eq!(
        ctx.state(),
        &AuthState::Authenticated {
            subject: "alice".to_string()
        }
    );
}

#[tokio::test]
async fn test_non_bearer_header_is_missing_token() {
    let auth = service();

    let mut ctx = RequestContext::new();
    let err = auth
        .authenticate_request(&mut ctx, Some("Basic xyz"))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingToken);
    assert_eq!(ctx.rejection_reason(), Some(ErrorKind::MissingToken));

    let err = auth.authenticate(None).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingToken);
}

#[tokio::test]
async fn test_tampered_token_is_unauthorized() {
    let auth = service();
    auth.register("alice", "pw1").await.unwrap();
    let login = auth.login("alice", "pw1").await.unwrap();
    let signature_len = login.token.rsplit_once('.').unwrap().1.len();

    for index in [0, signature_len / 2, signature_len - 1] {
        let forged = tamper_signature_at(&login.token, index);
        assert_ne!(forged, login.token);

        let direct = auth.verifier().verify(&forged).unwrap_err();
        assert_eq!(direct.kind, ErrorKind::BadSignature, "index {index}");

        let mut ctx = RequestContext::new();
        let err = auth
            .authenticate_request(&mut ctx, Some(&format!("Bearer {forged}")))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert_eq!(err.cause_kind(), ErrorKind::BadSignature);
        assert_eq!(ctx.rejection_reason(), Some(ErrorKind::BadSignature));
        assert!(ctx.subject().is_none());
    }
}

#[tokio::test]
async fn test_foreign_secret_is_unauthorized() {
    let auth = service();
    let foreign = TokenIssuer::new(&AuthConfig {
        jwt_secret: "a-completely-different-secret-0123456789".to_string(),
        ..test_config()
    })
    .issue("alice", Duration::hours(1))
    .unwrap();

    let err = auth
        .authenticate(Some(&format!("Bearer {}", foreign.token)))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
    assert_eq!(err.cause_kind(), ErrorKind::BadSignature);
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let auth = service();
    let stale = auth
        .issuer()
        .issue_at("alice", Duration::minutes(1), Utc::now() - Duration::hours(2))
        .unwrap();

    let err = auth
        .authenticate(Some(&format!("Bearer {}", stale.token)))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
    assert_eq!(err.cause_kind(), ErrorKind::Expired);
}

#[tokio::test]
async fn test_malformed_token_is_unauthorized() {
    let auth = service();
    let err = auth.authenticate(Some("Bearer not-a-jwt")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
    assert_eq!(err.cause_kind(), ErrorKind::MalformedToken);
}

#[tokio::test]
async fn test_one_second_token_expires() {
    let auth = service();
    let issued = auth.issuer().issue("alice", Duration::seconds(1)).unwrap();

    assert_eq!(auth.verifier().verify(&issued.token).unwrap(), "alice");

    // Expiry is rounded up to a whole second, so wait past the worst case.
    tokio::time::sleep(StdDuration::from_millis(2_100)).await;

    let err = auth.verifier().verify(&issued.token).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Expired);
}

#[tokio::test]
async fn test_invalid_ttl() {
    let auth = service();
    let err = auth.issuer().issue("alice", Duration::zero()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidTtl);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registration_single_winner() {
    let auth = service();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let auth = auth.clone();
            tokio::spawn(async move { auth.register("racer", &format!("pw-{i}")).await })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => winners += 1,
            Err(e) => assert_eq!(e.kind, ErrorKind::DuplicateIdentity),
        }
    }
    assert_eq!(winners, 1);
}

/// A backend that is unreachable, standing in for a failed database.
struct UnavailableStore;

#[async_trait]
impl CredentialStore for UnavailableStore {
    async fn insert(&self, _identity: Identity) -> AppResult<()> {
        Err(AppError::internal("store unavailable"))
    }

    async fn find(&self, _username: &str) -> AppResult<Identity> {
        Err(AppError::internal("store unavailable"))
    }

    async fn contains(&self, _username: &str) -> AppResult<bool> {
        Err(AppError::internal("store unavailable"))
    }

    async fn count(&self) -> AppResult<u64> {
        Err(AppError::internal("store unavailable"))
    }
}

#[tokio::test]
async fn test_store_outage_is_not_reported_as_bad_credentials() {
    let auth = AuthService::new(&test_config(), Arc::new(UnavailableStore)).unwrap();

    assert_eq!(
        auth.login("alice", "pw1").await.unwrap_err().kind,
        ErrorKind::Internal
    );
    assert_eq!(
        auth.register("alice", "pw1").await.unwrap_err().kind,
        ErrorKind::Internal
    );

    // The length limit is enforced before the store is consulted.
    let oversized = "x".repeat(test_config().password_max_length + 1);
    assert_eq!(
        auth.login("alice", &oversized).await.unwrap_err().kind,
        ErrorKind::InvalidCredentials
    );
}
