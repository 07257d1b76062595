// src/lib.rs

//! Webshop product extraction library.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
