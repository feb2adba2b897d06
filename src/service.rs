pub mod budget;
pub mod campaign;
pub mod chart;
pub mod client;
pub mod feed;
pub mod field_mapping;
pub mod list_view;
pub mod reporting;
