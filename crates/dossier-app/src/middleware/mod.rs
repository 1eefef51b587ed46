pub mod dossier_access;
