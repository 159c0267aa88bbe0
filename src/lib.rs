pub mod commands;
pub mod config;
pub mod defaults;
pub mod error;
pub mod i18n;
pub mod metadata;
pub mod server;
