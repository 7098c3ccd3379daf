use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Account details for a new user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    /// Raw password, hashed before it is stored
    pub password: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl NewUser {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            ..Default::default()
        }
    }
}

/// Partial update of a user; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMovie {
    pub title: String,
    pub description: String,
    /// Running time in minutes
    pub duration: i32,
    pub genre_ids: Option<Vec<i32>>,
    pub actor_ids: Option<Vec<i32>>,
}

impl NewMovie {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }
}

/// Filters for listing movies; every given filter must match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieFilter {
    /// Case-insensitive substring of the title
    pub title: Option<String>,
    /// Movie must have at least one of these genres
    pub genre_ids: Option<Vec<i32>>,
    /// Movie must have at least one of these actors
    pub actor_ids: Option<Vec<i32>>,
}

/// Partial update of a movie session; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUpdate {
    pub show_time: Option<NaiveDateTime>,
    pub movie_id: Option<i32>,
    pub cinema_hall_id: Option<i32>,
}

/// One seat requested as part of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRequest {
    pub movie_session: i32,
    pub row: i32,
    pub seat: i32,
}
