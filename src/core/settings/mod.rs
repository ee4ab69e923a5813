// Core settings module - runtime-mutable moderation configuration.

pub mod settings_models;
pub mod settings_service;

pub use settings_models::*;
pub use settings_service::*;
