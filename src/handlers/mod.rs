//! Surfaces consumed by the (external) transport layer

pub mod login;

pub use login::{login, LoginResponse};
