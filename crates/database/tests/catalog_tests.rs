mod common;

use database::{ServiceError, services::CatalogService};
use models::requests::{MovieFilter, NewMovie};

#[tokio::test]
async fn test_genres_and_actors() {
    let db = common::setup().await;

    let drama = CatalogService::create_genre(&db, "Drama").await.unwrap();
    CatalogService::create_genre(&db, "Comedy").await.unwrap();

    let err = CatalogService::create_genre(&db, "Drama").await.unwrap_err();
    match err {
        ServiceError::Validation(errors) => assert!(errors.contains("name")),
        other => panic!("unexpected error: {other:?}"),
    }

    let genres = CatalogService::get_genres(&db).await.unwrap();
    assert_eq!(genres.len(), 2);
    assert_eq!(genres[0], drama);

    let actor = CatalogService::create_actor(&db, "Keanu", "Reeves")
        .await
        .unwrap();
    assert_eq!(actor.full_name(), "Keanu Reeves");
    assert_eq!(CatalogService::get_actors(&db).await.unwrap(), vec![actor]);
}

#[tokio::test]
async fn test_create_movie_with_associations() {
    let db = common::setup().await;
    let drama = CatalogService::create_genre(&db, "Drama").await.unwrap();
    let scifi = CatalogService::create_genre(&db, "Sci-Fi").await.unwrap();
    let actor = CatalogService::create_actor(&db, "Keanu", "Reeves")
        .await
        .unwrap();

    let movie = CatalogService::create_movie(
        &db,
        NewMovie {
            title: "The Matrix".to_owned(),
            description: "Red pill".to_owned(),
            duration: 136,
            genre_ids: Some(vec![drama.id, scifi.id]),
            actor_ids: Some(vec![actor.id]),
        },
    )
    .await
    .unwrap();

    assert_eq!(movie.duration, 136);
    assert_eq!(
        CatalogService::get_movie_by_id(&db, movie.id).await.unwrap(),
        movie
    );
    assert_eq!(
        CatalogService::get_movie_genres(&db, movie.id).await.unwrap(),
        vec![drama, scifi]
    );
    assert_eq!(
        CatalogService::get_movie_actors(&db, movie.id).await.unwrap(),
        vec![actor]
    );
}

#[tokio::test]
async fn test_create_movie_with_unknown_genre_rolls_back() {
    let db = common::setup().await;

    let err = CatalogService::create_movie(
        &db,
        NewMovie {
            genre_ids: Some(vec![999]),
            ..NewMovie::new("Ghost", "Not there")
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidReference(_)));
    assert!(
        CatalogService::get_movies(&db, MovieFilter::default())
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_set_associations_replaces_previous_members() {
    let db = common::setup().await;
    let drama = CatalogService::create_genre(&db, "Drama").await.unwrap();
    let comedy = CatalogService::create_genre(&db, "Comedy").await.unwrap();
    let horror = CatalogService::create_genre(&db, "Horror").await.unwrap();
    let a = CatalogService::create_actor(&db, "Ann", "A").await.unwrap();
    let b = CatalogService::create_actor(&db, "Ben", "B").await.unwrap();

    let movie = CatalogService::create_movie(
        &db,
        NewMovie {
            genre_ids: Some(vec![drama.id, comedy.id]),
            actor_ids: Some(vec![a.id]),
            ..NewMovie::new("Mixed", "")
        },
    )
    .await
    .unwrap();

    CatalogService::set_movie_genres(&db, movie.id, &[comedy.id, horror.id])
        .await
        .unwrap();
    assert_eq!(
        CatalogService::get_movie_genres(&db, movie.id).await.unwrap(),
        vec![comedy, horror]
    );

    CatalogService::set_movie_actors(&db, movie.id, &[b.id])
        .await
        .unwrap();
    assert_eq!(
        CatalogService::get_movie_actors(&db, movie.id).await.unwrap(),
        vec![b]
    );

    CatalogService::set_movie_genres(&db, movie.id, &[])
        .await
        .unwrap();
    assert!(
        CatalogService::get_movie_genres(&db, movie.id)
            .await
            .unwrap()
            .is_empty()
    );

    assert!(matches!(
        CatalogService::set_movie_genres(&db, 999, &[drama.id]).await,
        Err(ServiceError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_get_movies_filters() {
    let db = common::setup().await;
    let g1 = CatalogService::create_genre(&db, "Action").await.unwrap();
    let g2 = CatalogService::create_genre(&db, "Sci-Fi").await.unwrap();
    let g3 = CatalogService::create_genre(&db, "Romance").await.unwrap();
    let a = CatalogService::create_actor(&db, "Keanu", "Reeves")
        .await
        .unwrap();
    let b = CatalogService::create_actor(&db, "Carrie-Anne", "Moss")
        .await
        .unwrap();

    let matrix = CatalogService::create_movie(
        &db,
        NewMovie {
            genre_ids: Some(vec![g1.id, g2.id]),
            actor_ids: Some(vec![a.id, b.id]),
            ..NewMovie::new("The Matrix", "")
        },
    )
    .await
    .unwrap();
    let notebook = CatalogService::create_movie(
        &db,
        NewMovie {
            genre_ids: Some(vec![g3.id]),
            ..NewMovie::new("The Notebook", "")
        },
    )
    .await
    .unwrap();

    // One actor match and two genre matches still yield the movie once
    let by_actor = CatalogService::get_movies(
        &db,
        MovieFilter {
            actor_ids: Some(vec![a.id]),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_actor, vec![matrix.clone()]);

    let by_genres = CatalogService::get_movies(
        &db,
        MovieFilter {
            genre_ids: Some(vec![g1.id, g2.id, g3.id]),
            actor_ids: Some(vec![a.id, b.id]),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_genres, vec![matrix.clone()]);

    let by_title = CatalogService::get_movies(
        &db,
        MovieFilter {
            title: Some("tHe".to_owned()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_title, vec![matrix.clone(), notebook.clone()]);

    let by_title_and_genre = CatalogService::get_movies(
        &db,
        MovieFilter {
            title: Some("NOTE".to_owned()),
            genre_ids: Some(vec![g1.id]),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(by_title_and_genre.is_empty());

    let wildcard = CatalogService::get_movies(
        &db,
        MovieFilter {
            title: Some("%".to_owned()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(wildcard.is_empty());

    let everything = CatalogService::get_movies(
        &db,
        MovieFilter {
            genre_ids: Some(vec![]),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(everything, vec![matrix, notebook]);
}

#[tokio::test]
async fn test_missing_movie() {
    let db = common::setup().await;

    assert!(matches!(
        CatalogService::get_movie_by_id(&db, 7).await,
        Err(ServiceError::NotFound { entity: "movie", .. })
    ));
}

#[tokio::test]
async fn test_title_filter_folds_query_case() {
    let db = common::setup().await;
    let amelie =
        CatalogService::create_movie(&db, NewMovie::new("Le fabuleux destin d'Amélie", ""))
            .await
            .unwrap();

    for query in ["AMÉLIE", "amélie", "Destin D'AMÉ"] {
        let found = CatalogService::get_movies(
            &db,
            MovieFilter {
                title: Some(query.to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(found, vec![amelie.clone()], "query {query:?}");
    }
}
