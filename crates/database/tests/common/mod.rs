#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use database::{
    entities::{cinema_halls, movie_sessions, movies, users},
    services::{CatalogService, CinemaHallService, MovieSessionService, UserService},
};
use migration::{Migrator, MigratorTrait};
use models::requests::{NewMovie, NewUser};
use sea_orm::DatabaseConnection;

/// Fresh in-memory database with the full schema applied
pub async fn setup() -> DatabaseConnection {
    let _ = env_logger::builder().is_test(true).try_init();

    let db = database::db::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, min, 0)
        .unwrap()
}

pub async fn user(db: &DatabaseConnection, username: &str) -> users::Model {
    UserService::create_user(db, NewUser::new(username, "s3cret-pass"))
        .await
        .unwrap()
}

pub struct Screening {
    pub movie: movies::Model,
    pub hall: cinema_halls::Model,
    pub session: movie_sessions::Model,
}

/// A movie shown once in a 5 x 8 hall
pub async fn screening(db: &DatabaseConnection) -> Screening {
    let movie = CatalogService::create_movie(db, NewMovie::new("Inception", "Dreams within dreams"))
        .await
        .unwrap();
    let hall = CinemaHallService::create_cinema_hall(db, "Blue", 5, 8)
        .await
        .unwrap();
    let session =
        MovieSessionService::create_movie_session(db, at(2025, 10, 18, 19, 30), movie.id, hall.id)
            .await
            .unwrap();

    Screening {
        movie,
        hall,
        session,
    }
}
