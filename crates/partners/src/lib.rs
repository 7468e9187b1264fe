// Bloxion Partners API Library
// Decision: Shared library for the server binary and router-level tests

// API DTOs and input validation
pub mod api;

// Router assembly
pub mod app;

// Discord OAuth, session tokens and cookies
pub mod auth;

// Environment configuration
pub mod config;

// HTTP error mapping
pub mod error;

// OpenAPI spec generation
pub mod openapi;

// Partner application submission and webhook relay
pub mod partners;

pub use config::AppConfig;
pub use error::ApiError;
