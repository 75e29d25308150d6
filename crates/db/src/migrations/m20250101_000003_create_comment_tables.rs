//! Create comment and comment rating tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Comment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Comment::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Comment::Content).text().not_null())
                    .col(ColumnDef::new(Comment::VideoId).string_len(32).not_null())
                    .col(ColumnDef::new(Comment::OwnerId).string_len(32).not_null())
                    .col(ColumnDef::new(Comment::ParentCommentId).string_len(32))
                    .col(
                        ColumnDef::new(Comment::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_video")
                            .from(Comment::Table, Comment::VideoId)
                            .to(Video::Table, Video::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_owner")
                            .from(Comment::Table, Comment::OwnerId)
                            .to(Channel::Table, Channel::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_parent")
                            .from(Comment::Table, Comment::ParentCommentId)
                            .to(Comment::Table, Comment::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (video_id, parent_comment_id) for top-level listing per video
        manager
            .create_index(
                Index::create()
                    .name("idx_comment_video_parent")
                    .table(Comment::Table)
                    .col(Comment::VideoId)
                    .col(Comment::ParentCommentId)
                    .to_owned(),
            )
            .await?;

        // Index: parent_comment_id (for replies and reply counts)
        manager
            .create_index(
                Index::create()
                    .name("idx_comment_parent_comment_id")
                    .table(Comment::Table)
                    .col(Comment::ParentCommentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comment_owner_id")
                    .table(Comment::Table)
                    .col(Comment::OwnerId)
                    .to_owned(),
            )
            .await?;

        // Primary key (comment_id, channel_id) - one rating per channel per comment
        manager
            .create_table(
                Table::create()
                    .table(CommentRating::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CommentRating::CommentId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommentRating::ChannelId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CommentRating::Type).string_len(16).not_null())
                    .primary_key(
                        Index::create()
                            .col(CommentRating::CommentId)
                            .col(CommentRating::ChannelId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_rating_comment")
                            .from(CommentRating::Table, CommentRating::CommentId)
                            .to(Comment::Table, Comment::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_rating_channel")
                            .from(CommentRating::Table, CommentRating::ChannelId)
                            .to(Channel::Table, Channel::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CommentRating::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Comment::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Comment {
    Table,
    Id,
    Content,
    VideoId,
    OwnerId,
    ParentCommentId,
    CreatedAt,
}

#[derive(Iden)]
enum CommentRating {
    Table,
    CommentId,
    ChannelId,
    Type,
}

#[derive(Iden)]
enum Video {
    Table,
    Id,
}

#[derive(Iden)]
enum Channel {
    Table,
    Id,
}
