//! Subcommands of the `hmcctl` inspector.

pub mod cmd_decode;
pub mod cmd_links;
pub mod cmd_query;
pub mod cmd_types;
pub mod common;
