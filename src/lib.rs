/// Launch records dashboard backed by the SpaceX v4 API
pub mod analytics;
pub mod clients;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod pagination;
pub mod routes;
pub mod services;
pub mod utils;

#[cfg(test)]
mod testing;
