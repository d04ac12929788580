pub mod config;
pub mod dates;
pub mod error;
pub mod fetch;
pub mod run;
