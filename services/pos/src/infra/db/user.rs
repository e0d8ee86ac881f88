use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

use showroom_core::sea_ext::fetch_page;
use showroom_domain::pagination::{Page, PageRequest};
use showroom_pos_schema::{user_sessions, users};

use super::{parse_column, search, search_term, transaction_error, try_page, write_error};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::types::{Session, User, UserFilter};
use crate::error::PosError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, PosError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, PosError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PosError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &User) -> Result<i64, PosError> {
        let mut am = user_to_active(user);
        am.id = NotSet;
        let model = am
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "create user"))?;
        Ok(model.id)
    }

    async fn update(&self, user: &User) -> Result<(), PosError> {
        user_to_active(user)
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "update user"))?;
        Ok(())
    }

    async fn update_ending_sessions(&self, user: &User) -> Result<u64, PosError> {
        let user = user.clone();
        self.db
            .transaction::<_, u64, DbErr>(|txn| {
                Box::pin(async move {
                    user_to_active(&user).update(txn).await?;
                    end_sessions(txn, user.id, user.updated_at).await
                })
            })
            .await
            .map_err(|e| transaction_error(e, "update user and end sessions"))
    }

    async fn list(&self, filter: &UserFilter, page: PageRequest) -> Result<Page<User>, PosError> {
        let mut query = users::Entity::find();
        if let Some(role) = filter.role {
            query = query.filter(users::Column::Role.eq(role.as_str()));
        }
        if let Some(active) = filter.is_active {
            query = query.filter(users::Column::IsActive.eq(active));
        }
        if let Some(term) = search_term(filter.search.as_deref()) {
            query = query.filter(search(
                term,
                &[
                    users::Column::Username,
                    users::Column::Email,
                    users::Column::FullName,
                ],
            ));
        }
        let page = fetch_page(query.order_by_asc(users::Column::Id), &self.db, page)
            .await
            .context("list users")?;
        try_page(page, user_from_model)
    }

    async fn count(&self) -> Result<u64, PosError> {
        let count = users::Entity::find()
            .count(&self.db)
            .await
            .context("count users")?;
        Ok(count)
    }

    async fn touch_last_login(&self, id: i64, at: DateTime<Utc>) -> Result<(), PosError> {
        users::ActiveModel {
            id: Set(id),
            last_login_at: Set(Some(at)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("touch last login")?;
        Ok(())
    }

    async fn set_created_by(&self, id: i64, creator: i64) -> Result<(), PosError> {
        users::ActiveModel {
            id: Set(id),
            created_by: Set(Some(creator)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set user creator")?;
        Ok(())
    }
}

fn user_to_active(user: &User) -> users::ActiveModel {
    users::ActiveModel {
        id: Set(user.id),
        username: Set(user.username.clone()),
        email: Set(user.email.clone()),
        password_hash: Set(user.password_hash.clone()),
        full_name: Set(user.full_name.clone()),
        phone: Set(user.phone.clone()),
        role: Set(user.role.as_str().to_owned()),
        is_active: Set(user.is_active),
        last_login_at: Set(user.last_login_at),
        created_by: Set(user.created_by),
        created_at: Set(user.created_at),
        updated_at: Set(user.updated_at),
    }
}

fn user_from_model(model: users::Model) -> Result<User, PosError> {
    Ok(User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        full_name: model.full_name,
        phone: model.phone,
        role: parse_column(&model.role)?,
        is_active: model.is_active,
        last_login_at: model.last_login_at,
        created_by: model.created_by,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Session repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSessionRepository {
    pub db: DatabaseConnection,
}

impl SessionRepository for DbSessionRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Session>, PosError> {
        let model = user_sessions::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find session by id")?;
        Ok(model.map(session_from_model))
    }

    async fn create(&self, session: &Session) -> Result<i64, PosError> {
        let model = user_sessions::ActiveModel {
            id: NotSet,
            user_id: Set(session.user_id),
            token: Set(session.token.clone()),
            ip_address: Set(session.ip_address.clone()),
            user_agent: Set(session.user_agent.clone()),
            login_at: Set(session.login_at),
            logout_at: Set(session.logout_at),
            expires_at: Set(session.expires_at),
            is_active: Set(session.is_active),
            created_at: Set(session.created_at),
            updated_at: Set(session.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create session")?;
        Ok(model.id)
    }

    async fn set_token(
        &self,
        id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), PosError> {
        user_sessions::ActiveModel {
            id: Set(id),
            token: Set(token.to_owned()),
            expires_at: Set(expires_at),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("store session token")?;
        Ok(())
    }

    async fn deactivate(&self, id: i64, at: DateTime<Utc>) -> Result<bool, PosError> {
        let result = user_sessions::Entity::update_many()
            .col_expr(user_sessions::Column::IsActive, Expr::value(false))
            .col_expr(user_sessions::Column::LogoutAt, Expr::value(at))
            .col_expr(user_sessions::Column::UpdatedAt, Expr::value(at))
            .filter(user_sessions::Column::Id.eq(id))
            .filter(user_sessions::Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .context("deactivate session")?;
        Ok(result.rows_affected > 0)
    }

    async fn deactivate_all(&self, user_id: i64, at: DateTime<Utc>) -> Result<u64, PosError> {
        let ended = end_sessions(&self.db, user_id, at)
            .await
            .context("deactivate user sessions")?;
        Ok(ended)
    }

    async fn list_active(&self, user_id: i64) -> Result<Vec<Session>, PosError> {
        let models = user_sessions::Entity::find()
            .filter(user_sessions::Column::UserId.eq(user_id))
            .filter(user_sessions::Column::IsActive.eq(true))
            .order_by_desc(user_sessions::Column::LoginAt)
            .all(&self.db)
            .await
            .context("list active sessions")?;
        Ok(models.into_iter().map(session_from_model).collect())
    }
}

async fn end_sessions<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    at: DateTime<Utc>,
) -> Result<u64, DbErr> {
    let result = user_sessions::Entity::update_many()
        .col_expr(user_sessions::Column::IsActive, Expr::value(false))
        .col_expr(user_sessions::Column::LogoutAt, Expr::value(at))
        .col_expr(user_sessions::Column::UpdatedAt, Expr::value(at))
        .filter(user_sessions::Column::UserId.eq(user_id))
        .filter(user_sessions::Column::IsActive.eq(true))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

fn session_from_model(model: user_sessions::Model) -> Session {
    Session {
        id: model.id,
        user_id: model.user_id,
        token: model.token,
        ip_address: model.ip_address,
        user_agent: model.user_agent,
        login_at: model.login_at,
        logout_at: model.logout_at,
        expires_at: model.expires_at,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
