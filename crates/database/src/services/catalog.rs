use crate::{
    entities::{actors, genres, movie_actors, movie_genres, movies},
    error::{ServiceError, ServiceResult},
};
use log::{debug, info};
use models::requests::{MovieFilter, NewMovie};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, ModelTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait, TransactionTrait,
    sea_query::{Expr, Func, LikeExpr},
};
use std::collections::BTreeSet;

pub struct CatalogService;

impl CatalogService {
    pub async fn create_genre<C: ConnectionTrait>(
        db: &C,
        name: &str,
    ) -> ServiceResult<genres::Model> {
        let existing = genres::Entity::find()
            .filter(genres::Column::Name.eq(name))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::invalid_field(
                "name",
                "Genre with this name already exists.",
            ));
        }

        let genre = genres::ActiveModel {
            name: Set(name.to_owned()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        Ok(genre)
    }

    pub async fn get_genres<C: ConnectionTrait>(db: &C) -> ServiceResult<Vec<genres::Model>> {
        Ok(genres::Entity::find()
            .order_by_asc(genres::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn create_actor<C: ConnectionTrait>(
        db: &C,
        first_name: &str,
        last_name: &str,
    ) -> ServiceResult<actors::Model> {
        let actor = actors::ActiveModel {
            first_name: Set(first_name.to_owned()),
            last_name: Set(last_name.to_owned()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        Ok(actor)
    }

    pub async fn get_actors<C: ConnectionTrait>(db: &C) -> ServiceResult<Vec<actors::Model>> {
        Ok(actors::Entity::find()
            .order_by_asc(actors::Column::Id)
            .all(db)
            .await?)
    }

    /// Create a movie and attach its genres and actors in one transaction
    pub async fn create_movie(
        db: &DatabaseConnection,
        new_movie: NewMovie,
    ) -> ServiceResult<movies::Model> {
        let txn = db.begin().await?;

        let movie = movies::ActiveModel {
            title: Set(new_movie.title),
            description: Set(new_movie.description),
            duration: Set(new_movie.duration),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if let Some(genre_ids) = new_movie.genre_ids {
            Self::replace_genres(&txn, movie.id, &genre_ids).await?;
        }
        if let Some(actor_ids) = new_movie.actor_ids {
            Self::replace_actors(&txn, movie.id, &actor_ids).await?;
        }

        txn.commit().await?;

        info!("Created movie {} ({})", movie.id, movie.title);
        Ok(movie)
    }

    /// Replace the whole genre set of a movie
    pub async fn set_movie_genres(
        db: &DatabaseConnection,
        movie_id: i32,
        genre_ids: &[i32],
    ) -> ServiceResult<()> {
        let txn = db.begin().await?;
        Self::get_movie_by_id(&txn, movie_id).await?;
        Self::replace_genres(&txn, movie_id, genre_ids).await?;
        txn.commit().await?;
        Ok(())
    }

    /// Replace the whole actor set of a movie
    pub async fn set_movie_actors(
        db: &DatabaseConnection,
        movie_id: i32,
        actor_ids: &[i32],
    ) -> ServiceResult<()> {
        let txn = db.begin().await?;
        Self::get_movie_by_id(&txn, movie_id).await?;
        Self::replace_actors(&txn, movie_id, actor_ids).await?;
        txn.commit().await?;
        Ok(())
    }

    /// Query movies, each listed once however many genres or actors match
    ///
    /// The title match is case-insensitive: the query is lowercased here and
    /// the column through SQL `LOWER`. PostgreSQL folds any Unicode letter;
    /// SQLite only folds ASCII, so there an uppercase non-ASCII letter in a
    /// stored title never matches.
    pub async fn get_movies<C: ConnectionTrait>(
        db: &C,
        filter: MovieFilter,
    ) -> ServiceResult<Vec<movies::Model>> {
        let mut query = movies::Entity::find();

        if let Some(title) = filter.title.filter(|t| !t.is_empty()) {
            let pattern = format!("%{}%", escape_like(&title.to_lowercase()));
            query = query.filter(
                Expr::expr(Func::lower(Expr::col((movies::Entity, movies::Column::Title))))
                    .like(LikeExpr::new(pattern).escape('\\')),
            );
        }

        // Membership is tested with subqueries so that no join can duplicate a movie
        if let Some(genre_ids) = filter.genre_ids.filter(|ids| !ids.is_empty()) {
            query = query.filter(
                movies::Column::Id.in_subquery(
                    movie_genres::Entity::find()
                        .select_only()
                        .column(movie_genres::Column::MovieId)
                        .filter(movie_genres::Column::GenreId.is_in(genre_ids))
                        .into_query(),
                ),
            );
        }

        if let Some(actor_ids) = filter.actor_ids.filter(|ids| !ids.is_empty()) {
            query = query.filter(
                movies::Column::Id.in_subquery(
                    movie_actors::Entity::find()
                        .select_only()
                        .column(movie_actors::Column::MovieId)
                        .filter(movie_actors::Column::ActorId.is_in(actor_ids))
                        .into_query(),
                ),
            );
        }

        Ok(query.order_by_asc(movies::Column::Id).all(db).await?)
    }

    pub async fn get_movie_by_id<C: ConnectionTrait>(
        db: &C,
        movie_id: i32,
    ) -> ServiceResult<movies::Model> {
        movies::Entity::find_by_id(movie_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("movie", movie_id))
    }

    pub async fn get_movie_genres<C: ConnectionTrait>(
        db: &C,
        movie_id: i32,
    ) -> ServiceResult<Vec<genres::Model>> {
        let movie = Self::get_movie_by_id(db, movie_id).await?;
        Ok(movie
            .find_related(genres::Entity)
            .order_by_asc(genres::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn get_movie_actors<C: ConnectionTrait>(
        db: &C,
        movie_id: i32,
    ) -> ServiceResult<Vec<actors::Model>> {
        let movie = Self::get_movie_by_id(db, movie_id).await?;
        Ok(movie
            .find_related(actors::Entity)
            .order_by_asc(actors::Column::Id)
            .all(db)
            .await?)
    }

    /// Drop links missing from `genre_ids`, then insert the new ones
    async fn replace_genres<C: ConnectionTrait>(
        db: &C,
        movie_id: i32,
        genre_ids: &[i32],
    ) -> ServiceResult<()> {
        let wanted: BTreeSet<i32> = genre_ids.iter().copied().collect();

        let mut stale = movie_genres::Entity::delete_many()
            .filter(movie_genres::Column::MovieId.eq(movie_id));
        if !wanted.is_empty() {
            stale = stale.filter(movie_genres::Column::GenreId.is_not_in(wanted.iter().copied()));
        }
        let removed = stale.exec(db).await?.rows_affected;

        let existing: BTreeSet<i32> = movie_genres::Entity::find()
            .filter(movie_genres::Column::MovieId.eq(movie_id))
            .all(db)
            .await?
            .into_iter()
            .map(|link| link.genre_id)
            .collect();

        let links: Vec<movie_genres::ActiveModel> = wanted
            .difference(&existing)
            .map(|&genre_id| movie_genres::ActiveModel {
                movie_id: Set(movie_id),
                genre_id: Set(genre_id),
            })
            .collect();
        let added = links.len();

        if !links.is_empty() {
            movie_genres::Entity::insert_many(links)
                .exec_without_returning(db)
                .await?;
        }

        debug!("Movie {movie_id} genres: {removed} removed, {added} added");
        Ok(())
    }

    /// Drop links missing from `actor_ids`, then insert the new ones
    async fn replace_actors<C: ConnectionTrait>(
        db: &C,
        movie_id: i32,
        actor_ids: &[i32],
    ) -> ServiceResult<()> {
        let wanted: BTreeSet<i32> = actor_ids.iter().copied().collect();

        let mut stale = movie_actors::Entity::delete_many()
            .filter(movie_actors::Column::MovieId.eq(movie_id));
        if !wanted.is_empty() {
            stale = stale.filter(movie_actors::Column::ActorId.is_not_in(wanted.iter().copied()));
        }
        let removed = stale.exec(db).await?.rows_affected;

        let existing: BTreeSet<i32> = movie_actors::Entity::find()
            .filter(movie_actors::Column::MovieId.eq(movie_id))
            .all(db)
            .await?
            .into_iter()
            .map(|link| link.actor_id)
            .collect();

        let links: Vec<movie_actors::ActiveModel> = wanted
            .difference(&existing)
            .map(|&actor_id| movie_actors::ActiveModel {
                movie_id: Set(movie_id),
                actor_id: Set(actor_id),
            })
            .collect();
        let added = links.len();

        if !links.is_empty() {
            movie_actors::Entity::insert_many(links)
                .exec_without_returning(db)
                .await?;
        }

        debug!("Movie {movie_id} actors: {removed} removed, {added} added");
        Ok(())
    }
}

/// Escape `LIKE` wildcards so user input only ever matches literally
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
