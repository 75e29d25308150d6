//! Create channel and channel subscription tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Channel::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Channel::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Channel::Email)
                            .string_len(320)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Channel::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Channel::Password).string_len(512).not_null())
                    .col(
                        ColumnDef::new(Channel::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ChannelSubscription::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChannelSubscription::SubscriberId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChannelSubscription::SubscribedToId)
                            .string_len(32)
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ChannelSubscription::SubscriberId)
                            .col(ChannelSubscription::SubscribedToId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_channel_subscription_subscriber")
                            .from(ChannelSubscription::Table, ChannelSubscription::SubscriberId)
                            .to(Channel::Table, Channel::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_channel_subscription_subscribed_to")
                            .from(
                                ChannelSubscription::Table,
                                ChannelSubscription::SubscribedToId,
                            )
                            .to(Channel::Table, Channel::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: subscribed_to_id (for listing a channel's subscribers)
        manager
            .create_index(
                Index::create()
                    .name("idx_channel_subscription_subscribed_to_id")
                    .table(ChannelSubscription::Table)
                    .col(ChannelSubscription::SubscribedToId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChannelSubscription::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Channel::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Channel {
    Table,
    Id,
    Email,
    Name,
    Password,
    CreatedAt,
}

#[derive(Iden)]
enum ChannelSubscription {
    Table,
    SubscriberId,
    SubscribedToId,
}
