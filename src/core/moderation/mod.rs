// Core moderation module - contains the blacklisted-link filter.

pub mod link_scanner;
pub mod moderation_models;
pub mod moderation_service;

pub use moderation_models::*;
pub use moderation_service::*;
