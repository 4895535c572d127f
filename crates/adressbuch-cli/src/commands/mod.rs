//! CLI subcommands.

pub mod release;
pub mod split;
