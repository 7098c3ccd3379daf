use crate::{
    entities::cinema_halls,
    error::{ServiceError, ServiceResult},
};
use log::info;
use models::seating::SeatGeometry;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ConnectionTrait, EntityTrait, QueryOrder};

pub struct CinemaHallService;

impl CinemaHallService {
    /// Create a hall; both dimensions must be positive
    pub async fn create_cinema_hall<C: ConnectionTrait>(
        db: &C,
        name: &str,
        rows: i32,
        seats_in_row: i32,
    ) -> ServiceResult<cinema_halls::Model> {
        let geometry = SeatGeometry::new(rows, seats_in_row)?;

        let hall = cinema_halls::ActiveModel {
            name: Set(name.to_owned()),
            rows: Set(geometry.rows),
            seats_in_row: Set(geometry.seats_in_row),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(
            "Created cinema hall {} ({}) with {} seats",
            hall.id,
            hall.name,
            hall.capacity()
        );
        Ok(hall)
    }

    pub async fn get_cinema_halls<C: ConnectionTrait>(
        db: &C,
    ) -> ServiceResult<Vec<cinema_halls::Model>> {
        Ok(cinema_halls::Entity::find()
            .order_by_asc(cinema_halls::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn get_cinema_hall_by_id<C: ConnectionTrait>(
        db: &C,
        hall_id: i32,
    ) -> ServiceResult<cinema_halls::Model> {
        cinema_halls::Entity::find_by_id(hall_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("cinema hall", hall_id))
    }
}
