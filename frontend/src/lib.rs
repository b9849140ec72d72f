pub mod api;
pub mod auth_flow;
pub mod category_art;
pub mod components;
pub mod config;
pub mod error;
pub mod format;
pub mod forms;
pub mod guard;
pub mod hooks;
pub mod image_cache;
pub mod models;
pub mod notify;
pub mod routes;
pub mod session;
pub mod storage;
pub mod summary;
