//! # Results Module
//!
//! Accepts typing-test submissions from authenticated users.

pub mod handlers;
pub mod models;
pub mod routes;


pub use routes::results_routes;
