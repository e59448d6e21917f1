//! CLI subcommands

pub mod debate;
pub mod info;
pub mod protocol;
