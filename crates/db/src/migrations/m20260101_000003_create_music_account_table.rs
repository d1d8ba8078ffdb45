//! Create music account table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MusicAccount::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MusicAccount::UserId)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MusicAccount::AccessToken).text().not_null())
                    .col(ColumnDef::new(MusicAccount::RefreshToken).text().not_null())
                    .col(ColumnDef::new(MusicAccount::Scope).string_len(512))
                    .col(
                        ColumnDef::new(MusicAccount::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MusicAccount::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(MusicAccount::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_music_account_user")
                            .from(MusicAccount::Table, MusicAccount::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MusicAccount::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MusicAccount {
    Table,
    UserId,
    AccessToken,
    RefreshToken,
    Scope,
    ExpiresAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
