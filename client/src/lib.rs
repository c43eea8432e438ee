//! Foxhole War API 클라이언트

pub mod config;
pub mod error;
pub mod warapi;


pub use config::{ClientOptions, Config, Server};
pub use error::{Error, RegionFailure, Result};
pub use warapi::WarApiClient;
