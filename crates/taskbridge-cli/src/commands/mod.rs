//! Command handlers

pub mod collections;
pub mod config;
pub mod map;
pub mod parse;
pub mod sync;
