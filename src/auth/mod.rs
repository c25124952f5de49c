//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - The GitHub OAuth login and callback flow
//! - JWT bearer credential issue and verification
//! - The MaybeUser extractor that resolves the caller's identity

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod token;


pub use extractors::MaybeUser;
pub use models::User;
pub use routes::auth_routes;
