//! Request and response contracts shared by the server and the SDK

pub mod contracts;
pub mod mapping;

pub use contracts::*;
