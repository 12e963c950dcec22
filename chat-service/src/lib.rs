pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod session;
pub mod startup;
