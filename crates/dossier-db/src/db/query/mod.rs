pub mod audit;
pub mod dossier;
pub mod guest_token;
