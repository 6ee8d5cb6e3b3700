//! Configuration validation
//!
//! Checks an experiment specification before any trainer is built.

mod error;
mod validator;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod tests;

pub use error::ValidationError;
pub use validator::validate_config;
