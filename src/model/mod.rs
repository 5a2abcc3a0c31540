pub mod apperror;
pub mod config;
pub mod models;
pub mod record;
pub mod seed;
