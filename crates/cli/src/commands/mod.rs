//! CLI subcommands.
//!
//! Each command renders to any `Write` so output can be checked in tests.

pub mod account;
pub mod browse;
pub mod cart;
