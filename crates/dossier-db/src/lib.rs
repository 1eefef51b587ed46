//! Postgres persistence for the dossier access-control tables.

pub mod db;
pub mod error;
pub mod model;
