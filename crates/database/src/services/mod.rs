pub mod catalog;
pub mod cinema_hall;
pub mod movie_session;
pub mod order;
pub mod user;

pub use catalog::CatalogService;
pub use cinema_hall::CinemaHallService;
pub use movie_session::MovieSessionService;
pub use order::OrderService;
pub use user::UserService;
