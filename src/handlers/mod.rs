pub mod admin;
pub mod appointments;
pub mod auth;
pub mod photos;
