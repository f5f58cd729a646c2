use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Genres::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Genres::GenreId)
                            .string_len(1)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Genres::Name).string_len(20).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Movies::MovieId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Movies::Name).string().not_null())
                    .col(ColumnDef::new(Movies::Year).integer().not_null())
                    .col(ColumnDef::new(Movies::Rating).integer().not_null())
                    .col(ColumnDef::new(Movies::GenreId).string_len(1).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movies_genre_id")
                            .from(Movies::Table, Movies::GenreId)
                            .to(Genres::Table, Genres::GenreId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_genre_id")
                    .table(Movies::Table)
                    .col(Movies::GenreId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Movies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Genres::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Genres {
    Table,
    GenreId,
    Name,
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    MovieId,
    Name,
    Year,
    Rating,
    GenreId,
}
