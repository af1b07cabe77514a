pub mod config;
pub mod content;
pub mod domain;
pub mod forms;
mod routes;
pub mod startup;
pub mod submission;
pub mod telemetry;
mod util;
