mod common;

use chrono::NaiveDate;
use common::at;
use database::{
    ServiceError,
    entities::{cinema_halls, movie_sessions, movies, tickets},
    services::{CatalogService, CinemaHallService, MovieSessionService, OrderService},
};
use models::requests::{NewMovie, SessionUpdate, TicketRequest};
use sea_orm::{EntityTrait, PaginatorTrait};

#[tokio::test]
async fn test_cinema_halls() {
    let db = common::setup().await;

    let hall = CinemaHallService::create_cinema_hall(&db, "Red", 10, 12)
        .await
        .unwrap();
    assert_eq!(hall.capacity(), 120);

    let err = CinemaHallService::create_cinema_hall(&db, "Broken", 0, -1)
        .await
        .unwrap_err();
    match err {
        ServiceError::Validation(errors) => {
            assert!(errors.contains("rows"));
            assert!(errors.contains("seats_in_row"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let halls = CinemaHallService::get_cinema_halls(&db).await.unwrap();
    assert_eq!(halls, vec![hall.clone()]);
    assert_eq!(
        CinemaHallService::get_cinema_hall_by_id(&db, hall.id)
            .await
            .unwrap(),
        hall
    );
}

#[tokio::test]
async fn test_create_session_requires_existing_references() {
    let db = common::setup().await;
    let screening = common::screening(&db).await;

    let err = MovieSessionService::create_movie_session(
        &db,
        at(2025, 10, 18, 12, 0),
        999,
        screening.hall.id,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidReference(_)));

    let err = MovieSessionService::create_movie_session(
        &db,
        at(2025, 10, 18, 12, 0),
        screening.movie.id,
        999,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidReference(_)));
}

#[tokio::test]
async fn test_get_sessions_by_date() {
    let db = common::setup().await;
    let screening = common::screening(&db).await;
    let (movie_id, hall_id) = (screening.movie.id, screening.hall.id);
    let at = |day, hour, min| at(2025, 10, day, hour, min);

    let late = MovieSessionService::create_movie_session(&db, at(18, 23, 59), movie_id, hall_id)
        .await
        .unwrap();
    let early = MovieSessionService::create_movie_session(&db, at(18, 0, 0), movie_id, hall_id)
        .await
        .unwrap();
    let next_day = MovieSessionService::create_movie_session(&db, at(19, 0, 0), movie_id, hall_id)
        .await
        .unwrap();

    let day = NaiveDate::from_ymd_opt(2025, 10, 18).unwrap();
    let on_day = MovieSessionService::get_movie_sessions(&db, Some(day))
        .await
        .unwrap();
    assert_eq!(on_day, vec![early, screening.session.clone(), late]);

    let all = MovieSessionService::get_movie_sessions(&db, None)
        .await
        .unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all.last(), Some(&next_day));
}

#[tokio::test]
async fn test_update_session_changes_only_given_fields() {
    let db = common::setup().await;
    let screening = common::screening(&db).await;
    let other_movie = CatalogService::create_movie(&db, NewMovie::new("Tenet", ""))
        .await
        .unwrap();

    let updated = MovieSessionService::update_movie_session(
        &db,
        screening.session.id,
        SessionUpdate {
            movie_id: Some(other_movie.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.movie_id, other_movie.id);
    assert_eq!(updated.show_time, screening.session.show_time);
    assert_eq!(updated.cinema_hall_id, screening.hall.id);

    let moved = MovieSessionService::update_movie_session(
        &db,
        screening.session.id,
        SessionUpdate {
            show_time: Some(at(2025, 12, 31, 21, 0)),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(moved.show_time, at(2025, 12, 31, 21, 0));
    assert_eq!(moved.movie_id, other_movie.id);

    assert!(matches!(
        MovieSessionService::update_movie_session(&db, 999, SessionUpdate::default()).await,
        Err(ServiceError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_delete_session_removes_its_tickets_only() {
    let db = common::setup().await;
    let alice = common::user(&db, "alice").await;
    let screening = common::screening(&db).await;

    let order = OrderService::create_order(
        &db,
        vec![TicketRequest {
            movie_session: screening.session.id,
            row: 1,
            seat: 1,
        }],
        &alice.username,
        None,
    )
    .await
    .unwrap();

    MovieSessionService::delete_movie_session_by_id(&db, screening.session.id)
        .await
        .unwrap();

    assert!(matches!(
        MovieSessionService::get_movie_session_by_id(&db, screening.session.id).await,
        Err(ServiceError::NotFound { .. })
    ));
    assert_eq!(tickets::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(
        OrderService::get_orders(&db, None).await.unwrap(),
        vec![order]
    );

    assert!(matches!(
        MovieSessionService::delete_movie_session_by_id(&db, screening.session.id).await,
        Err(ServiceError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_deleting_hall_or_movie_cascades() {
    let db = common::setup().await;
    let alice = common::user(&db, "alice").await;
    let screening = common::screening(&db).await;

    OrderService::create_order(
        &db,
        vec![TicketRequest {
            movie_session: screening.session.id,
            row: 2,
            seat: 3,
        }],
        &alice.username,
        None,
    )
    .await
    .unwrap();

    cinema_halls::Entity::delete_by_id(screening.hall.id)
        .exec(&db)
        .await
        .unwrap();

    assert_eq!(movie_sessions::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(tickets::Entity::find().count(&db).await.unwrap(), 0);

    // Sessions also go away with their movie
    let hall = CinemaHallService::create_cinema_hall(&db, "Green", 3, 3)
        .await
        .unwrap();
    MovieSessionService::create_movie_session(
        &db,
        at(2025, 11, 1, 18, 0),
        screening.movie.id,
        hall.id,
    )
    .await
    .unwrap();

    movies::Entity::delete_by_id(screening.movie.id)
        .exec(&db)
        .await
        .unwrap();
    assert_eq!(movie_sessions::Entity::find().count(&db).await.unwrap(), 0);
}
