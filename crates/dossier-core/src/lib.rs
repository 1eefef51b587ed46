//! Shared building blocks for the dossier backend: configuration, the core
//! error type, identifier newtypes and route constants.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
