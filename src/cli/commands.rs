//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - chat: interactive REPL against a selected server
//! - demo: non-interactive scenario walkthroughs
//! - list: print the available server blueprints

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// REPL client and demos for the MCP math servers
#[derive(Parser, Debug)]
#[command(name = "mcp-math")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session against a server
    Chat {
        /// Server blueprint name or alias (default: from config)
        #[arg(short, long)]
        server: Option<String>,

        /// Model override for the planner and the autonomous reasoner
        #[arg(long)]
        model: Option<String>,

        /// Print the raw JSON payload returned by each tool
        #[arg(long)]
        show_json: bool,

        /// Force the LLM planner to interpret natural-language queries
        #[arg(long, conflicts_with = "no_planner")]
        planner: bool,

        /// Disable the LLM planner even if available
        #[arg(long)]
        no_planner: bool,
    },

    /// Run demo scenarios against the servers
    Demo {
        /// Scenario or blueprint name (default: all)
        scenario: Option<String>,

        /// List available scenarios and exit
        #[arg(long)]
        list: bool,
    },

    /// List the available server blueprints
    List,
}
