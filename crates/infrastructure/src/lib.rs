//! Rootwalk Infrastructure Layer
pub mod dns;
