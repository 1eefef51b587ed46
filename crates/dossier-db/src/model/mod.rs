pub mod audit;
pub mod guest_token;
