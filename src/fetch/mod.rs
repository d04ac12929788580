// src/fetch/mod.rs
pub mod extract;
pub mod urls;
pub mod zips;
