// The infra module contains implementations of core traits
// and everything that talks to the process environment.

#[path = "settings/in_memory.rs"]
pub mod settings;

pub mod env_config;
