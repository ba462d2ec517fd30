//! src/commands/mod.rs

pub mod generate;
