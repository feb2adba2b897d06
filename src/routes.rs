pub mod campaign;
pub mod client;
pub mod error;
pub mod feed;
pub mod field_mapping;
pub mod health;
pub mod reporting;
