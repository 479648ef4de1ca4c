// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserFollowing::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserFollowing::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserFollowing::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(UserFollowing::FollowedUid)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserFollowing::Status)
                            .small_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(UserFollowing::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(UserFollowing::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // One row per ordered pair; upserts conflict on this index
        manager
            .create_index(
                Index::create()
                    .unique()
                    .name("uk_user_following_pair")
                    .table(UserFollowing::Table)
                    .col(UserFollowing::UserId)
                    .col(UserFollowing::FollowedUid)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_following_user_status_id")
                    .table(UserFollowing::Table)
                    .col(UserFollowing::UserId)
                    .col(UserFollowing::Status)
                    .col(UserFollowing::Id)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserFollowing::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserFollowing {
    Table,
    Id,
    UserId,
    FollowedUid,
    Status,
    CreatedAt,
    UpdatedAt,
}
