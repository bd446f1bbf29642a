#![doc = include_str!("../README.md")]

pub mod cache;
mod client;
pub mod config;
mod error;
pub mod fetcher;
mod jwk;
pub mod pem;
pub mod util;

pub use crate::client::Client;
pub use crate::error::JwksError;
pub use crate::jwk::{Jwk, JwkSet};
