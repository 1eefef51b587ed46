//! Dossier access-control resolution.
//!
//! Turns an inbound request plus a target dossier into either an
//! [`access::AccessContext`] or an [`access::Denial`].

pub mod access;
pub mod error;
