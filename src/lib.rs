// src/lib.rs

//! Estate notice library: fetches the court's bankruptcy-estate sale notice
//! board, parses it, and serves the results as JSON.

pub mod api;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
