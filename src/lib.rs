pub mod analytics;
pub mod app;
pub mod auth;
pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod expenses;
pub mod state;
pub mod storage;
