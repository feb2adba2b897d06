pub mod campaign;
pub mod client;
pub mod feed;
pub mod http_gateway;
pub mod reporting;
