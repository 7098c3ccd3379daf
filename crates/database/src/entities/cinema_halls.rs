use models::seating::SeatGeometry;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cinema_halls")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
}

impl Model {
    /// Seat space of this hall, used to validate tickets
    pub fn geometry(&self) -> SeatGeometry {
        SeatGeometry {
            rows: self.rows,
            seats_in_row: self.seats_in_row,
        }
    }

    /// Derived on read, never stored
    pub fn capacity(&self) -> i64 {
        self.geometry().capacity()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movie_sessions::Entity")]
    MovieSessions,
}

impl Related<super::movie_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieSessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
