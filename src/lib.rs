pub mod config;
pub mod error;
pub mod handlers;
pub mod observability;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod types;
pub mod version;
