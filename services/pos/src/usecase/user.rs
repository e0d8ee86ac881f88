use chrono::Utc;
use tracing::info;

use showroom_domain::pagination::{Page, PageRequest};
use showroom_domain::user::UserRole;

use crate::domain::patch::UserPatch;
use crate::domain::repository::UserRepository;
use crate::domain::types::{User, UserFilter};
use crate::error::{PosError, Resource};
use crate::password::hash_password;
use crate::usecase::auth::validate_password;
use crate::usecase::{optional, required};

pub struct CreateUserInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
}

/// Credentials of the first administrator, inserted on an empty database.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub struct UserService<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UserService<U> {
    pub async fn create(&self, input: CreateUserInput, created_by: i64) -> Result<User, PosError> {
        self.insert(input, Some(created_by)).await
    }

    pub async fn get(&self, id: i64) -> Result<User, PosError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(PosError::NotFound(Resource::User))
    }

    pub async fn list(&self, filter: &UserFilter, page: PageRequest) -> Result<Page<User>, PosError> {
        self.users.list(filter, page.clamped()).await
    }

    pub async fn update(&self, id: i64, patch: UserPatch) -> Result<User, PosError> {
        let mut user = self.get(id).await?;
        if let Some(username) = patch.username.as_deref() {
            self.ensure_username_free(username, Some(id)).await?;
        }
        if let Some(email) = patch.email.as_deref() {
            self.ensure_email_free(email, Some(id)).await?;
        }
        let deactivating = patch.is_active == Some(false) && user.is_active;
        patch.apply_to(&mut user);
        user.username = required("username", &user.username)?;
        user.email = required("email", &user.email)?;
        user.full_name = required("full_name", &user.full_name)?;
        user.updated_at = Utc::now();
        if deactivating {
            let revoked = self.users.update_ending_sessions(&user).await?;
            info!(user_id = id, revoked, "user deactivated");
        } else {
            self.users.update(&user).await?;
        }
        Ok(user)
    }

    /// Disable the account and end all of its sessions.
    pub async fn deactivate(&self, id: i64) -> Result<User, PosError> {
        let mut user = self.get(id).await?;
        let now = Utc::now();
        user.is_active = false;
        user.updated_at = now;
        let revoked = self.users.update_ending_sessions(&user).await?;
        info!(user_id = id, revoked, "user deactivated");
        Ok(user)
    }

    pub async fn activate(&self, id: i64) -> Result<User, PosError> {
        let mut user = self.get(id).await?;
        user.is_active = true;
        user.updated_at = Utc::now();
        self.users.update(&user).await?;
        Ok(user)
    }

    /// Insert the first administrator when no account exists yet. The row is
    /// inserted without a creator and then pointed at itself.
    pub async fn bootstrap_admin(&self, admin: BootstrapAdmin) -> Result<Option<User>, PosError> {
        if self.users.count().await? > 0 {
            return Ok(None);
        }
        let input = CreateUserInput {
            full_name: admin.username.clone(),
            username: admin.username,
            email: admin.email,
            password: admin.password,
            phone: None,
            role: UserRole::Admin,
        };
        let mut user = self.insert(input, None).await?;
        self.users.set_created_by(user.id, user.id).await?;
        user.created_by = Some(user.id);
        info!(user_id = user.id, username = %user.username, "bootstrap admin created");
        Ok(Some(user))
    }

    async fn insert(&self, input: CreateUserInput, created_by: Option<i64>) -> Result<User, PosError> {
        let username = required("username", &input.username)?;
        let email = required("email", &input.email)?;
        if !email.contains('@') {
            return Err(PosError::validation("email", "email is not valid"));
        }
        validate_password(&input.password)?;
        self.ensure_username_free(&username, None).await?;
        self.ensure_email_free(&email, None).await?;

        let now = Utc::now();
        let mut user = User {
            id: 0,
            username,
            email,
            password_hash: hash_password(&input.password)?,
            full_name: required("full_name", &input.full_name)?,
            phone: optional(input.phone),
            role: input.role,
            is_active: true,
            last_login_at: None,
            created_by,
            created_at: now,
            updated_at: now,
        };
        user.id = self.users.create(&user).await?;
        Ok(user)
    }

    async fn ensure_username_free(&self, username: &str, except: Option<i64>) -> Result<(), PosError> {
        match self.users.find_by_username(username.trim()).await? {
            Some(existing) if Some(existing.id) != except => Err(PosError::conflict(format!(
                "username {} already exists",
                username.trim()
            ))),
            _ => Ok(()),
        }
    }

    async fn ensure_email_free(&self, email: &str, except: Option<i64>) -> Result<(), PosError> {
        match self.users.find_by_email(email.trim()).await? {
            Some(existing) if Some(existing.id) != except => Err(PosError::conflict(format!(
                "email {} already exists",
                email.trim()
            ))),
            _ => Ok(()),
        }
    }
}
