//! Dossier access service - integration test support.
//!
//! Re-exports the workspace crates under one name so integration tests can
//! use `dossier_test::` paths.

pub use dossier_core::types;
pub use dossier_db as db;
pub use dossier_service as service;

pub mod app {
    pub use dossier_app::*;
}

pub mod access {
    pub use dossier_service::access::memory::{
        InMemoryAccessStore, RecordedDenial, StaticAuthenticationService,
    };
    pub use dossier_service::access::*;
}

pub mod config {
    pub use dossier_core::config::*;
}
