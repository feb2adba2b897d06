pub mod budget;
pub mod campaign;
pub mod chart;
pub mod client;
pub mod dashboard;
pub mod feed;
pub mod field_mapping;
pub mod health;
pub mod job_stats;
pub mod pagination;
