pub mod configuration;
pub mod connectors;
pub mod db;
pub mod errors;
pub mod forms;
pub mod helpers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod startup;
pub mod telemetry;
pub mod views;
