//! HTTP request handlers
//!
//! Handlers stay thin: extract, delegate to a service, shape the response.

pub mod auth;
pub mod intake;
pub mod materials;
pub mod programs;
pub mod reports;
pub mod requests;
pub mod warehouses;
