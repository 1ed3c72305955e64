use gurukul::config::jwt::JwtConfig;
use gurukul::utils::jwt::{create_access_token, verify_token};
use gurukul_models::ids::UserId;

fn test_config() -> JwtConfig {
    JwtConfig {
        secret: "unit-test-secret".to_string(),
        access_token_expiry: 3600,
    }
}

#[test]
fn token_roundtrip_preserves_claims() {
    let config = test_config();
    let user_id = UserId::new();

    let token = create_access_token(user_id, "user@example.com", &config).unwrap();
    let claims = verify_token(&token, &config).unwrap();

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.email, "user@example.com");
    assert!(claims.exp > claims.iat);
}

#[test]
fn tampered_token_is_rejected() {
    let config = test_config();
    let token = create_access_token(UserId::new(), "user@example.com", &config).unwrap();

    let mut tampered = token.clone();
    tampered.push('x');
    assert!(verify_token(&tampered, &config).is_err());
}

#[test]
fn wrong_secret_is_rejected() {
    let config = test_config();
    let token = create_access_token(UserId::new(), "user@example.com", &config).unwrap();

    let other = JwtConfig {
        secret: "a-different-secret".to_string(),
        access_token_expiry: 3600,
    };
    assert!(verify_token(&token, &other).is_err());
}

#[test]
fn garbage_is_rejected() {
    assert!(verify_token("not-a-jwt", &test_config()).is_err());
}
