pub use super::appointment_photos::Entity as AppointmentPhotos;
pub use super::appointments::Entity as Appointments;
pub use super::staff_users::Entity as StaffUsers;
