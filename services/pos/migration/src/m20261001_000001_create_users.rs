use sea_orm_migration::prelude::*;

use crate::columns::{fk, fk_null, flag, pk, text, text_null, timestamp_now, timestamp_null, unique_text};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk(Users::Id))
                    .col(unique_text(Users::Username))
                    .col(unique_text(Users::Email))
                    .col(text(Users::PasswordHash))
                    .col(text(Users::FullName))
                    .col(text_null(Users::Phone))
                    .col(text(Users::Role))
                    .col(flag(Users::IsActive, true))
                    .col(timestamp_null(Users::LastLoginAt))
                    .col(fk_null(Users::CreatedBy))
                    .col(timestamp_now(Users::CreatedAt))
                    .col(timestamp_now(Users::UpdatedAt))
                    // Self reference: the first admin is inserted, then pointed at itself.
                    .foreign_key(
                        ForeignKey::create()
                            .from(Users::Table, Users::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserSessions::Table)
                    .if_not_exists()
                    .col(pk(UserSessions::Id))
                    .col(fk(UserSessions::UserId))
                    .col(ColumnDef::new(UserSessions::Token).text().not_null())
                    .col(text_null(UserSessions::IpAddress))
                    .col(ColumnDef::new(UserSessions::UserAgent).text().null())
                    .col(timestamp_now(UserSessions::LoginAt))
                    .col(timestamp_null(UserSessions::LogoutAt))
                    .col(
                        ColumnDef::new(UserSessions::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(flag(UserSessions::IsActive, true))
                    .col(timestamp_now(UserSessions::CreatedAt))
                    .col(timestamp_now(UserSessions::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserSessions::Table, UserSessions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_sessions_user_id_active")
                    .table(UserSessions::Table)
                    .col(UserSessions::UserId)
                    .col(UserSessions::IsActive)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserSessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    FullName,
    Phone,
    Role,
    IsActive,
    LastLoginAt,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum UserSessions {
    Table,
    Id,
    UserId,
    Token,
    IpAddress,
    UserAgent,
    LoginAt,
    LogoutAt,
    ExpiresAt,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
