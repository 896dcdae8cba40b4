//! Job-board REST API with a typed HTTP consumer layer.
//!
//! The server side (models, store, routes) is wired up by the `api` binary;
//! the `client`, `browse`, and `client::fetcher` modules are the consumer
//! surface for programs that talk to the API over HTTP.

pub mod ai;
pub mod browse;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod jobs;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod telemetry;
