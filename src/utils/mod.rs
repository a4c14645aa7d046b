//! # utils
//!
//! Property parsing and host resolution utilities

pub mod net;
pub mod parse;
