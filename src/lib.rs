pub mod admin;
pub mod auth;
pub mod backend;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod error;
pub mod media;
pub mod models;

pub use error::{Error, Result, ValidationError};
