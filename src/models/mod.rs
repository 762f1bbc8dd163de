pub mod appointment;
pub mod photo;
