//! Core shell modules

pub mod config;
