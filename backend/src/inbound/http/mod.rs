//! HTTP inbound adapter exposing the `/users` resource.

pub mod error;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
