//! Request/Response DTOs

pub mod claims;
