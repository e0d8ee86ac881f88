use std::sync::Arc;

use anyhow::Context as _;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use showroom_auth_types::token::{
    AuthError, TokenSubject, decode_ignoring_expiry, issue_token, validate_access_token,
};
use showroom_domain::user::{MIN_PASSWORD_LEN, UserRole};

use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::types::{Session, User};
use crate::error::{PosError, Resource};
use crate::password::{hash_password, verify_password};

/// Token signing parameters.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

/// Caller identity after token, session and account checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: i64,
    pub username: String,
    pub role: UserRole,
    pub session_id: i64,
}

impl CurrentUser {
    pub fn require_role(&self, allowed: &[UserRole]) -> Result<(), PosError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(PosError::Forbidden)
        }
    }

    /// Admins and managers pass approval gates and sign-offs.
    pub fn require_approver(&self) -> Result<(), PosError> {
        if self.role.can_approve() {
            Ok(())
        } else {
            Err(PosError::Forbidden)
        }
    }
}

pub struct LoginInput {
    pub username: String,
    pub password: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IssuedToken {
    pub token: String,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub expires_at: DateTime<Utc>,
    pub session_id: i64,
}

#[derive(Debug, Serialize)]
pub struct LoginOutput {
    #[serde(flatten)]
    pub token: IssuedToken,
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

pub struct AuthService<U: UserRepository, S: SessionRepository> {
    pub users: U,
    pub sessions: S,
    pub settings: Arc<AuthSettings>,
}

impl<U: UserRepository, S: SessionRepository> AuthService<U, S> {
    pub async fn login(&self, input: LoginInput) -> Result<LoginOutput, PosError> {
        let user = self
            .users
            .find_by_username(input.username.trim())
            .await?
            .ok_or_else(|| PosError::unauthorized("invalid username or password"))?;
        if !user.is_active {
            return Err(PosError::unauthorized("user account is inactive"));
        }
        if !verify_password(&input.password, &user.password_hash) {
            return Err(PosError::unauthorized("invalid username or password"));
        }

        let now = Utc::now();
        let expires_at = now + self.settings.token_ttl;
        let session = Session {
            id: 0,
            user_id: user.id,
            token: String::new(),
            ip_address: input.ip_address,
            user_agent: input.user_agent,
            login_at: now,
            logout_at: None,
            expires_at,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let session_id = self.sessions.create(&session).await?;
        let token = self.sign(&user, session_id, now)?;
        self.sessions
            .set_token(session_id, &token.token, token.expires_at)
            .await?;
        self.users.touch_last_login(user.id, now).await?;

        info!(user_id = user.id, session_id, "user logged in");
        Ok(LoginOutput { token, user })
    }

    pub async fn logout(&self, current: &CurrentUser) -> Result<(), PosError> {
        self.sessions
            .deactivate(current.session_id, Utc::now())
            .await?;
        info!(
            user_id = current.user_id,
            session_id = current.session_id,
            "user logged out"
        );
        Ok(())
    }

    /// Re-issue a token for the session named by `token`. The old token may be
    /// expired; the session and the account must both still be active.
    pub async fn refresh(&self, token: &str) -> Result<IssuedToken, PosError> {
        let claims = decode_ignoring_expiry(token, &self.settings.jwt_secret)
            .map_err(|_| PosError::unauthorized("invalid token"))?;
        self.active_session(claims.session_id, claims.user_id)
            .await?;
        let user = self.active_user(claims.user_id).await?;

        let issued = self.sign(&user, claims.session_id, Utc::now())?;
        self.sessions
            .set_token(claims.session_id, &issued.token, issued.expires_at)
            .await?;
        Ok(issued)
    }

    /// Resolve a bearer token to the caller.
    pub async fn authenticate(&self, token: &str) -> Result<CurrentUser, PosError> {
        let claims = validate_access_token(token, &self.settings.jwt_secret).map_err(|e| {
            match e {
                AuthError::Expired => PosError::unauthorized("token expired"),
                _ => PosError::unauthorized("invalid token"),
            }
        })?;
        self.active_session(claims.session_id, claims.user_id)
            .await?;
        let user = self.active_user(claims.user_id).await?;
        Ok(CurrentUser {
            user_id: user.id,
            username: user.username,
            role: user.role,
            session_id: claims.session_id,
        })
    }

    pub async fn me(&self, user_id: i64) -> Result<User, PosError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(PosError::NotFound(Resource::User))
    }

    /// Change the caller's password. Every session of the user is revoked,
    /// the current one included.
    pub async fn change_password(
        &self,
        user_id: i64,
        input: ChangePasswordInput,
    ) -> Result<(), PosError> {
        let mut user = self.me(user_id).await?;
        if !verify_password(&input.current_password, &user.password_hash) {
            return Err(PosError::validation(
                "current_password",
                "current password is incorrect",
            ));
        }
        if input.new_password != input.confirm_password {
            return Err(PosError::validation(
                "confirm_password",
                "password confirmation does not match",
            ));
        }
        validate_password(&input.new_password)?;

        let now = Utc::now();
        user.password_hash = hash_password(&input.new_password)?;
        user.updated_at = now;
        let revoked = self.users.update_ending_sessions(&user).await?;
        info!(user_id, revoked, "password changed");
        Ok(())
    }

    pub async fn sessions(&self, user_id: i64) -> Result<Vec<Session>, PosError> {
        self.sessions.list_active(user_id).await
    }

    pub async fn revoke_all(&self, user_id: i64) -> Result<u64, PosError> {
        let revoked = self.sessions.deactivate_all(user_id, Utc::now()).await?;
        info!(user_id, revoked, "sessions revoked");
        Ok(revoked)
    }

    async fn active_session(&self, session_id: i64, user_id: i64) -> Result<Session, PosError> {
        self.sessions
            .find_by_id(session_id)
            .await?
            .filter(|s| s.is_active && s.user_id == user_id)
            .ok_or_else(|| PosError::unauthorized("session is no longer active"))
    }

    async fn active_user(&self, user_id: i64) -> Result<User, PosError> {
        self.users
            .find_by_id(user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| PosError::unauthorized("user account is inactive"))
    }

    fn sign(
        &self,
        user: &User,
        session_id: i64,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, PosError> {
        let subject = TokenSubject {
            user_id: user.id,
            username: &user.username,
            email: &user.email,
            role: user.role,
            session_id,
        };
        let ttl = self.settings.token_ttl.num_seconds().max(1) as u64;
        let (token, exp) = issue_token(
            &subject,
            &self.settings.jwt_secret,
            now.timestamp().max(0) as u64,
            ttl,
        )
        .context("sign access token")?;
        let expires_at = DateTime::from_timestamp(exp as i64, 0).unwrap_or(now);
        Ok(IssuedToken {
            token,
            expires_at,
            session_id,
        })
    }
}

/// Password policy shared by account creation and password change.
pub fn validate_password(password: &str) -> Result<(), PosError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(PosError::validation(
            "password",
            format!("password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    Ok(())
}
