//! CLI module - Command-line interface for Cinedex
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// Cinedex - movie catalog with an admin web interface
#[derive(Parser)]
#[command(name = "cinedex")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (JSON API and admin pages)
    #[command(alias = "daemon", alias = "web")]
    Serve,

    /// Create default config file
    Init,

    /// Create an administrator account
    CreateAdmin {
        /// Login name
        username: String,
        /// Password; read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// List genres sorted by name
    #[command(alias = "g")]
    Genres,

    /// List movies, optionally filtered
    #[command(alias = "ls")]
    Movies {
        /// Match the start of any word in the name
        #[arg(long, short)]
        search: Option<String>,
        /// Exact genre name
        #[arg(long, short)]
        genre: Option<String>,
    },
}

pub use commands::*;
