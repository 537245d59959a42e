//! CLI argument definitions using clap
//!
//! Commands:
//! - capsearch search --fixture <path> [--config <path>] [--eq ATTR=VALUE]...
//!   [--contains ATTR=VALUE]... [--page-size N] [--offset N] [--cookie TOKEN]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::model::PagingRequest;

/// capsearch - capability-aware search over a backend connector
#[derive(Parser, Debug)]
#[command(name = "capsearch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one search against a fixture backend and print the results
    Search(SearchArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Path to the fixture (capabilities, filter support, records)
    #[arg(long)]
    pub fixture: PathBuf,

    /// Path to the engine configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Equality term; equality terms come before substring terms in an And
    #[arg(long = "eq", value_name = "ATTR=VALUE")]
    pub equals: Vec<String>,

    /// Substring term
    #[arg(long = "contains", value_name = "ATTR=VALUE")]
    pub contains: Vec<String>,

    /// Page size; absent or zero selects the configured default
    #[arg(long)]
    pub page_size: Option<usize>,

    /// 1-based offset of the first record
    #[arg(long, allow_hyphen_values = true)]
    pub offset: Option<i64>,

    /// Continuation token from a previous page
    #[arg(long)]
    pub cookie: Option<String>,
}

impl SearchArgs {
    /// Paging request, if any paging flag was given
    pub fn paging(&self) -> Option<PagingRequest> {
        if self.page_size.is_none() && self.offset.is_none() && self.cookie.is_none() {
            return None;
        }
        Some(PagingRequest {
            page_size: self.page_size,
            offset: self.offset,
            cookie: self.cookie.clone(),
        })
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
