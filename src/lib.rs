pub mod auth;
pub mod config;
pub mod error;
pub mod github;
pub mod handlers;
pub mod models;
pub mod tree_view;
