pub mod app;
pub mod auth;
pub mod comments;
pub mod config;
pub mod db;
pub mod error;
pub mod escape;
pub mod products;
pub mod response;
pub mod seed;
pub mod state;
