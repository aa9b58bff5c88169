use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

use entity::{
    ArtistEntity, PlaylistEntity, PlaylistSongColumn, PlaylistSongEntity, SongColumn, SongEntity,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(manager.get_database_backend());

        // parents before children, the foreign keys come from the entity relations
        manager
            .exec_stmt(schema.create_table_from_entity(ArtistEntity))
            .await?;
        manager
            .exec_stmt(schema.create_table_from_entity(SongEntity))
            .await?;
        manager
            .exec_stmt(schema.create_table_from_entity(PlaylistEntity))
            .await?;
        manager
            .exec_stmt(schema.create_table_from_entity(PlaylistSongEntity))
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-song-title")
                    .table(SongEntity)
                    .col(SongColumn::Title)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx-song-artist_id")
                    .table(SongEntity)
                    .col(SongColumn::ArtistId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx-playlist_song-song_id")
                    .table(PlaylistSongEntity)
                    .col(PlaylistSongColumn::SongId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PlaylistSongEntity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PlaylistEntity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SongEntity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ArtistEntity).to_owned())
            .await
    }
}
