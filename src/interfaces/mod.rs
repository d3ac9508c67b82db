//! User-facing interfaces outside HTTP

pub mod cli;
