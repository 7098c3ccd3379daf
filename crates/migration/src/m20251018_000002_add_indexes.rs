use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Title lookups back the movie search
        manager
            .create_index(
                Index::create()
                    .name("idx_movies_title")
                    .table(Movies::Table)
                    .col(Movies::Title)
                    .to_owned(),
            )
            .await?;

        // Index on movie_sessions for date filtering
        manager
            .create_index(
                Index::create()
                    .name("idx_movie_sessions_show_time")
                    .table(MovieSessions::Table)
                    .col(MovieSessions::ShowTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_sessions_movie_id")
                    .table(MovieSessions::Table)
                    .col(MovieSessions::MovieId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_sessions_cinema_hall_id")
                    .table(MovieSessions::Table)
                    .col(MovieSessions::CinemaHallId)
                    .to_owned(),
            )
            .await?;

        // Orders are listed per user, newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_user_id_created_at")
                    .table(Orders::Table)
                    .col(Orders::UserId)
                    .col(Orders::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tickets_order_id")
                    .table(Tickets::Table)
                    .col(Tickets::OrderId)
                    .to_owned(),
            )
            .await?;

        // Reverse lookups on the junction tables
        manager
            .create_index(
                Index::create()
                    .name("idx_movie_genres_genre_id")
                    .table(MovieGenres::Table)
                    .col(MovieGenres::GenreId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_actors_actor_id")
                    .table(MovieActors::Table)
                    .col(MovieActors::ActorId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_movies_title")
                    .table(Movies::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_movie_sessions_show_time")
                    .table(MovieSessions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_movie_sessions_movie_id")
                    .table(MovieSessions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_movie_sessions_cinema_hall_id")
                    .table(MovieSessions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_orders_user_id_created_at")
                    .table(Orders::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_tickets_order_id")
                    .table(Tickets::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_movie_genres_genre_id")
                    .table(MovieGenres::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_movie_actors_actor_id")
                    .table(MovieActors::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Movies {
    Table,
    Title,
}

#[derive(Iden)]
enum MovieSessions {
    Table,
    ShowTime,
    MovieId,
    CinemaHallId,
}

#[derive(Iden)]
enum Orders {
    Table,
    UserId,
    CreatedAt,
}

#[derive(Iden)]
enum Tickets {
    Table,
    OrderId,
}

#[derive(Iden)]
enum MovieGenres {
    Table,
    GenreId,
}

#[derive(Iden)]
enum MovieActors {
    Table,
    ActorId,
}
