//! CLI module - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for the chat REPL, the
//! demo scenario runner, and blueprint listing.

pub mod commands;

pub use commands::Cli;
