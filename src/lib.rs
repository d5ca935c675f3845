pub mod analytics;
pub mod api;
pub mod config;
pub mod models;
pub mod qr;
pub mod redirect;
pub mod storage;
