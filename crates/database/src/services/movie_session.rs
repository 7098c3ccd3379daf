use crate::{
    entities::{cinema_halls, movie_sessions, movies},
    error::{ServiceError, ServiceResult},
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use log::info;
use models::requests::SessionUpdate;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

pub struct MovieSessionService;

impl MovieSessionService {
    pub async fn create_movie_session<C: ConnectionTrait>(
        db: &C,
        show_time: NaiveDateTime,
        movie_id: i32,
        cinema_hall_id: i32,
    ) -> ServiceResult<movie_sessions::Model> {
        Self::ensure_references(db, Some(movie_id), Some(cinema_hall_id)).await?;

        let session = movie_sessions::ActiveModel {
            show_time: Set(show_time),
            movie_id: Set(movie_id),
            cinema_hall_id: Set(cinema_hall_id),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(
            "Scheduled session {} of movie {movie_id} in hall {cinema_hall_id} at {show_time}",
            session.id
        );
        Ok(session)
    }

    /// All sessions, or only those on the given calendar date
    pub async fn get_movie_sessions<C: ConnectionTrait>(
        db: &C,
        date: Option<NaiveDate>,
    ) -> ServiceResult<Vec<movie_sessions::Model>> {
        let mut query = movie_sessions::Entity::find();

        if let Some(date) = date {
            let day_start = date.and_time(NaiveTime::MIN);
            let day_end = day_start + TimeDelta::days(1);
            query = query
                .filter(movie_sessions::Column::ShowTime.gte(day_start))
                .filter(movie_sessions::Column::ShowTime.lt(day_end));
        }

        Ok(query
            .order_by_asc(movie_sessions::Column::ShowTime)
            .order_by_asc(movie_sessions::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn get_movie_session_by_id<C: ConnectionTrait>(
        db: &C,
        session_id: i32,
    ) -> ServiceResult<movie_sessions::Model> {
        movie_sessions::Entity::find_by_id(session_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("movie session", session_id))
    }

    /// Update the supplied fields only
    pub async fn update_movie_session<C: ConnectionTrait>(
        db: &C,
        session_id: i32,
        update: SessionUpdate,
    ) -> ServiceResult<movie_sessions::Model> {
        let session = Self::get_movie_session_by_id(db, session_id).await?;
        Self::ensure_references(db, update.movie_id, update.cinema_hall_id).await?;

        let mut active: movie_sessions::ActiveModel = session.clone().into();
        if let Some(show_time) = update.show_time {
            active.show_time = Set(show_time);
        }
        if let Some(movie_id) = update.movie_id {
            active.movie_id = Set(movie_id);
        }
        if let Some(cinema_hall_id) = update.cinema_hall_id {
            active.cinema_hall_id = Set(cinema_hall_id);
        }

        if !active.is_changed() {
            return Ok(session);
        }

        Ok(active.update(db).await?)
    }

    /// Delete a session; its tickets go with it through the foreign key cascade
    pub async fn delete_movie_session_by_id<C: ConnectionTrait>(
        db: &C,
        session_id: i32,
    ) -> ServiceResult<()> {
        let result = movie_sessions::Entity::delete_by_id(session_id)
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("movie session", session_id));
        }

        info!("Deleted movie session {session_id}");
        Ok(())
    }

    async fn ensure_references<C: ConnectionTrait>(
        db: &C,
        movie_id: Option<i32>,
        cinema_hall_id: Option<i32>,
    ) -> ServiceResult<()> {
        if let Some(movie_id) = movie_id {
            let found = movies::Entity::find_by_id(movie_id).count(db).await?;
            if found == 0 {
                return Err(ServiceError::InvalidReference(format!(
                    "movie {movie_id} does not exist"
                )));
            }
        }

        if let Some(cinema_hall_id) = cinema_hall_id {
            let found = cinema_halls::Entity::find_by_id(cinema_hall_id)
                .count(db)
                .await?;
            if found == 0 {
                return Err(ServiceError::InvalidReference(format!(
                    "cinema hall {cinema_hall_id} does not exist"
                )));
            }
        }

        Ok(())
    }
}
