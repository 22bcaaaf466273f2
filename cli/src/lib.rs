//! LocalFlow administration console: the blog store driven from the command
//! line, persisted under a local directory.

pub mod cli;
pub mod commands;
pub mod seeds;
pub mod utils;
