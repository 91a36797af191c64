// src/lib.rs

pub mod config;
pub mod prompt;
pub mod provider;
pub mod server;
pub mod session;
