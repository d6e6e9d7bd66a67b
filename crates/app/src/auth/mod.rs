//! Authentication

mod errors;
mod key;
mod models;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use key::{SessionKey, SessionKeyError};
pub use models::*;
pub use service::*;
pub use token::*;
