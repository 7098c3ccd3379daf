pub mod password;
pub mod requests;
pub mod seating;
pub mod validation;
