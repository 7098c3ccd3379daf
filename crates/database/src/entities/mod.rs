pub mod actors;
pub mod cinema_halls;
pub mod genres;
pub mod movie_actors;
pub mod movie_genres;
pub mod movie_sessions;
pub mod movies;
pub mod orders;
pub mod tickets;
pub mod users;
