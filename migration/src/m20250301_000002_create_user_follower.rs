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
                    .table(UserFollower::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserFollower::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserFollower::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(UserFollower::FollowerUid)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserFollower::Status)
                            .small_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(UserFollower::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(UserFollower::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Mirror of uk_user_following_pair
        manager
            .create_index(
                Index::create()
                    .unique()
                    .name("uk_user_follower_pair")
                    .table(UserFollower::Table)
                    .col(UserFollower::UserId)
                    .col(UserFollower::FollowerUid)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_follower_user_status_id")
                    .table(UserFollower::Table)
                    .col(UserFollower::UserId)
                    .col(UserFollower::Status)
                    .col(UserFollower::Id)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserFollower::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserFollower {
    Table,
    Id,
    UserId,
    FollowerUid,
    Status,
    CreatedAt,
    UpdatedAt,
}
