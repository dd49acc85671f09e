//! Fleet Health Monitor
//!
//! Backend REST de registros de salud de vehículos (temperatura, vibración,
//! estado IA), cliente HTTP, controlador de dashboard con polling y
//! componentes de presentación para terminal.

pub mod client;
pub mod config;
pub mod controllers;
pub mod dashboard;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod presentation;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;
