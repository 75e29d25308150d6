//! Create video, video view and video rating tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Video::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Video::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Video::Title).string_len(512).not_null())
                    .col(ColumnDef::new(Video::Type).string_len(128).not_null())
                    .col(ColumnDef::new(Video::Attributes).text().not_null())
                    .col(ColumnDef::new(Video::Description).text())
                    .col(
                        ColumnDef::new(Video::UploadedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Video::OwnerId).string_len(32).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_video_owner")
                            .from(Video::Table, Video::OwnerId)
                            .to(Channel::Table, Channel::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: owner_id (for listing a channel's videos)
        manager
            .create_index(
                Index::create()
                    .name("idx_video_owner_id")
                    .table(Video::Table)
                    .col(Video::OwnerId)
                    .to_owned(),
            )
            .await?;

        // Views are an append-only log; no uniqueness per viewer.
        manager
            .create_table(
                Table::create()
                    .table(VideoView::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VideoView::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VideoView::VideoId).string_len(32).not_null())
                    .col(ColumnDef::new(VideoView::ChannelId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(VideoView::ViewedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_video_view_video")
                            .from(VideoView::Table, VideoView::VideoId)
                            .to(Video::Table, Video::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_video_view_channel")
                            .from(VideoView::Table, VideoView::ChannelId)
                            .to(Channel::Table, Channel::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_video_view_video_id")
                    .table(VideoView::Table)
                    .col(VideoView::VideoId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_video_view_channel_id")
                    .table(VideoView::Table)
                    .col(VideoView::ChannelId)
                    .to_owned(),
            )
            .await?;

        // Primary key (video_id, channel_id) - one rating per channel per video
        manager
            .create_table(
                Table::create()
                    .table(VideoRating::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(VideoRating::VideoId).string_len(32).not_null())
                    .col(ColumnDef::new(VideoRating::ChannelId).string_len(32).not_null())
                    .col(ColumnDef::new(VideoRating::Type).string_len(16).not_null())
                    .primary_key(
                        Index::create()
                            .col(VideoRating::VideoId)
                            .col(VideoRating::ChannelId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_video_rating_video")
                            .from(VideoRating::Table, VideoRating::VideoId)
                            .to(Video::Table, Video::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_video_rating_channel")
                            .from(VideoRating::Table, VideoRating::ChannelId)
                            .to(Channel::Table, Channel::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_video_rating_channel_id")
                    .table(VideoRating::Table)
                    .col(VideoRating::ChannelId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VideoRating::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VideoView::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Video::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Video {
    Table,
    Id,
    Title,
    Type,
    Attributes,
    Description,
    UploadedAt,
    OwnerId,
}

#[derive(Iden)]
enum VideoView {
    Table,
    Id,
    VideoId,
    ChannelId,
    ViewedAt,
}

#[derive(Iden)]
enum VideoRating {
    Table,
    VideoId,
    ChannelId,
    Type,
}

#[derive(Iden)]
enum Channel {
    Table,
    Id,
}
