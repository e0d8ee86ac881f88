use showroom_domain::user::UserRole;
use showroom_testing::auth::MockAuth;

use showroom_pos::domain::patch::UserPatch;
use showroom_pos::error::PosError;
use showroom_pos::usecase::auth::{ChangePasswordInput, LoginInput};
use showroom_pos::usecase::user::{BootstrapAdmin, CreateUserInput};

use crate::helpers::{MemoryDb, PASSWORD, auth_service, seed_user, user_service};

fn login_input(username: &str, password: &str) -> LoginInput {
    LoginInput {
        username: username.to_owned(),
        password: password.to_owned(),
        ip_address: Some("10.0.0.7".to_owned()),
        user_agent: Some("pos-terminal".to_owned()),
    }
}

// ── login / authenticate ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_login_and_authenticate_with_issued_token() {
    let db = MemoryDb::new();
    let user = seed_user(&db, "sari", UserRole::Sales);
    let auth = auth_service(&db);

    let out = auth.login(login_input("sari", PASSWORD)).await.unwrap();
    assert_eq!(out.user.id, user.id);
    assert!(!out.token.token.is_empty());

    let current = auth.authenticate(&out.token.token).await.unwrap();
    assert_eq!(current.user_id, user.id);
    assert_eq!(current.role, UserRole::Sales);
    assert_eq!(current.session_id, out.token.session_id);

    let store = db.lock();
    let session = store.sessions.iter().find(|s| s.id == out.token.session_id).unwrap();
    assert_eq!(session.token, out.token.token);
    assert_eq!(session.ip_address.as_deref(), Some("10.0.0.7"));
    assert!(store.users[0].last_login_at.is_some());
}

#[tokio::test]
async fn should_reject_wrong_password_without_opening_a_session() {
    let db = MemoryDb::new();
    seed_user(&db, "sari", UserRole::Sales);

    let result = auth_service(&db).login(login_input("sari", "not-the-password")).await;
    assert!(
        matches!(result, Err(PosError::Unauthorized(_))),
        "expected Unauthorized, got {result:?}"
    );
    assert!(db.lock().sessions.is_empty());
}

#[tokio::test]
async fn should_reject_login_of_deactivated_account() {
    let db = MemoryDb::new();
    let user = seed_user(&db, "sari", UserRole::Sales);
    user_service(&db).deactivate(user.id).await.unwrap();

    let result = auth_service(&db).login(login_input("sari", PASSWORD)).await;
    assert!(matches!(result, Err(PosError::Unauthorized(_))));
}

#[tokio::test]
async fn should_reject_token_after_logout() {
    let db = MemoryDb::new();
    seed_user(&db, "sari", UserRole::Sales);
    let auth = auth_service(&db);

    let out = auth.login(login_input("sari", PASSWORD)).await.unwrap();
    let current = auth.authenticate(&out.token.token).await.unwrap();
    auth.logout(&current).await.unwrap();

    let result = auth.authenticate(&out.token.token).await;
    assert!(matches!(result, Err(PosError::Unauthorized(_))));
}

#[tokio::test]
async fn should_reject_token_of_deactivated_user() {
    let db = MemoryDb::new();
    seed_user(&db, "sari", UserRole::Sales);
    let auth = auth_service(&db);
    let out = auth.login(login_input("sari", PASSWORD)).await.unwrap();

    db.lock().users[0].is_active = false;

    let result = auth.authenticate(&out.token.token).await;
    assert!(matches!(result, Err(PosError::Unauthorized(_))));
}

// ── refresh ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_refresh_expired_token_while_session_is_active() {
    let db = MemoryDb::new();
    let user = seed_user(&db, "sari", UserRole::Sales);
    let auth = auth_service(&db);
    let out = auth.login(login_input("sari", PASSWORD)).await.unwrap();

    let expired = MockAuth::new(user.id, UserRole::Sales, out.token.session_id).expired_token();
    assert!(auth.authenticate(&expired).await.is_err());

    let issued = auth.refresh(&expired).await.unwrap();
    assert_eq!(issued.session_id, out.token.session_id);
    auth.authenticate(&issued.token).await.unwrap();
}

#[tokio::test]
async fn should_refuse_refresh_of_revoked_session() {
    let db = MemoryDb::new();
    let user = seed_user(&db, "sari", UserRole::Sales);
    let auth = auth_service(&db);
    let out = auth.login(login_input("sari", PASSWORD)).await.unwrap();

    assert_eq!(auth.revoke_all(user.id).await.unwrap(), 1);

    let result = auth.refresh(&out.token.token).await;
    assert!(matches!(result, Err(PosError::Unauthorized(_))));
}

#[tokio::test]
async fn should_refuse_refresh_of_token_signed_elsewhere() {
    let db = MemoryDb::new();
    let result = auth_service(&db).refresh("not-a-jwt").await;
    assert!(matches!(result, Err(PosError::Unauthorized(_))));
}

// ── change_password / sessions ───────────────────────────────────────────────

#[tokio::test]
async fn should_revoke_every_session_on_password_change() {
    let db = MemoryDb::new();
    let user = seed_user(&db, "sari", UserRole::Sales);
    let auth = auth_service(&db);
    let first = auth.login(login_input("sari", PASSWORD)).await.unwrap();
    let second = auth.login(login_input("sari", PASSWORD)).await.unwrap();
    assert_eq!(auth.sessions(user.id).await.unwrap().len(), 2);

    auth.change_password(
        user.id,
        ChangePasswordInput {
            current_password: PASSWORD.to_owned(),
            new_password: "lebih-rahasia".to_owned(),
            confirm_password: "lebih-rahasia".to_owned(),
        },
    )
    .await
    .unwrap();

    assert!(auth.authenticate(&first.token.token).await.is_err());
    assert!(auth.authenticate(&second.token.token).await.is_err());
    assert!(auth.sessions(user.id).await.unwrap().is_empty());
    assert!(auth.login(login_input("sari", PASSWORD)).await.is_err());
    auth.login(login_input("sari", "lebih-rahasia")).await.unwrap();
}

#[tokio::test]
async fn should_reject_password_change_with_mismatched_confirmation() {
    let db = MemoryDb::new();
    let user = seed_user(&db, "sari", UserRole::Sales);

    let result = auth_service(&db)
        .change_password(
            user.id,
            ChangePasswordInput {
                current_password: PASSWORD.to_owned(),
                new_password: "lebih-rahasia".to_owned(),
                confirm_password: "beda-sekali".to_owned(),
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(PosError::Validation {
            field: "confirm_password",
            ..
        })
    ));
}

// ── users ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_bootstrap_admin_only_on_empty_database() {
    let db = MemoryDb::new();
    let users = user_service(&db);
    let admin = BootstrapAdmin {
        username: "admin".to_owned(),
        email: "admin@showroom.test".to_owned(),
        password: "admin-password".to_owned(),
    };

    let created = users.bootstrap_admin(admin.clone()).await.unwrap().unwrap();
    assert_eq!(created.role, UserRole::Admin);
    assert_eq!(created.created_by, Some(created.id));
    assert_eq!(db.lock().users[0].created_by, Some(created.id));

    assert!(users.bootstrap_admin(admin).await.unwrap().is_none());
    assert_eq!(db.lock().users.len(), 1);
}

#[tokio::test]
async fn should_reject_duplicate_username() {
    let db = MemoryDb::new();
    let admin = seed_user(&db, "admin", UserRole::Admin);
    seed_user(&db, "sari", UserRole::Sales);

    let result = user_service(&db)
        .create(
            CreateUserInput {
                username: "sari".to_owned(),
                email: "sari2@showroom.test".to_owned(),
                password: PASSWORD.to_owned(),
                full_name: "Sari Dua".to_owned(),
                phone: None,
                role: UserRole::Cashier,
            },
            admin.id,
        )
        .await;
    assert!(matches!(result, Err(PosError::Conflict(_))));
}

#[tokio::test]
async fn should_end_sessions_when_user_is_deactivated() {
    let db = MemoryDb::new();
    let user = seed_user(&db, "budi", UserRole::Mechanic);
    let auth = auth_service(&db);
    let out = auth.login(login_input("budi", PASSWORD)).await.unwrap();

    user_service(&db).deactivate(user.id).await.unwrap();

    assert!(auth.authenticate(&out.token.token).await.is_err());
    assert!(db.lock().sessions.iter().all(|s| !s.is_active));
}

#[tokio::test]
async fn should_end_sessions_at_the_moment_of_deactivation_by_patch() {
    let db = MemoryDb::new();
    let user = seed_user(&db, "budi", UserRole::Mechanic);
    let auth = auth_service(&db);
    auth.login(login_input("budi", PASSWORD)).await.unwrap();
    auth.login(login_input("budi", PASSWORD)).await.unwrap();

    let updated = user_service(&db)
        .update(
            user.id,
            UserPatch {
                is_active: Some(false),
                ..UserPatch::default()
            },
        )
        .await
        .unwrap();

    assert!(!updated.is_active);
    let store = db.lock();
    assert_eq!(store.sessions.len(), 2);
    assert!(
        store
            .sessions
            .iter()
            .all(|s| !s.is_active && s.logout_at == Some(updated.updated_at))
    );
}
