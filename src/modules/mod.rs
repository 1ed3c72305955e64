pub mod attendance;
pub mod auth;
pub mod batches;
pub mod classes;
pub mod demo_bookings;
pub mod events;
pub mod fees;
pub mod notes;
pub mod notifications;
pub mod profiles;
pub mod roles;
pub mod students;
pub mod tasks;
pub mod testimonials;
pub mod tests;
