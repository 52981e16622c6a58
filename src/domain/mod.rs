pub mod calendar;
pub mod models;
pub mod session;
pub mod text;
