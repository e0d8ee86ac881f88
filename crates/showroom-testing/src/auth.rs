//! Signed bearer tokens for tests.
//!
//! `MockAuth` signs a token for an arbitrary user/session pair so tests can
//! reach the session checks without going through login.

use std::time::{SystemTime, UNIX_EPOCH};

use http::header::AUTHORIZATION;
use http::{HeaderMap, HeaderValue};

use showroom_auth_types::token::{TokenSubject, issue_token};
use showroom_domain::user::UserRole;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";

/// Identity baked into a test token.
pub struct MockAuth {
    pub user_id: i64,
    pub username: String,
    pub role: UserRole,
    pub session_id: i64,
}

impl MockAuth {
    pub fn new(user_id: i64, role: UserRole, session_id: i64) -> Self {
        Self {
            user_id,
            username: format!("user{user_id}"),
            role,
            session_id,
        }
    }

    /// Token valid for one hour.
    pub fn token(&self) -> String {
        self.token_at(now_secs(), 3600)
    }

    /// Token that expired an hour ago.
    pub fn expired_token(&self) -> String {
        self.token_at(now_secs() - 7200, 3600)
    }

    fn token_at(&self, issued_at: u64, ttl: u64) -> String {
        let email = format!("{}@example.com", self.username);
        let subject = TokenSubject {
            user_id: self.user_id,
            username: &self.username,
            email: &email,
            role: self.role,
            session_id: self.session_id,
        };
        issue_token(&subject, TEST_JWT_SECRET, issued_at, ttl)
            .expect("sign test token")
            .0
    }

    /// `Authorization: Bearer …` header map.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token())).expect("header value"),
        );
        map
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}
