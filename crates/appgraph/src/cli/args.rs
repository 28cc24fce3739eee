//! CLI argument structs for all commands.

use clap::Parser;

use super::types::CycleSearchArg;
use crate::query::AppSelector;

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Rewrite the configuration of an existing registry
    ///
    /// Entity files that already exist are kept.
    #[arg(short, long)]
    pub force: bool,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `tree` command
#[derive(Parser, Debug, Clone)]
pub struct TreeArgs {
    /// Application id or code (digits are tried as an id first, then as a code)
    pub app: AppSelector,

    /// Maximum depth of the tree (1-10, default from config)
    #[arg(short, long)]
    pub depth: Option<usize>,
}

/// Arguments for the `path` command
#[derive(Parser, Debug, Clone)]
pub struct PathArgs {
    /// Application the path starts from (id, or code when no id matches)
    pub from: AppSelector,

    /// Application the path ends at (id, or code when no id matches)
    pub to: AppSelector,
}

/// Arguments for the `cycles` command
#[derive(Parser, Debug, Clone)]
pub struct CyclesArgs {
    /// Search mode (default from config)
    #[arg(short, long, value_enum)]
    pub mode: Option<CycleSearchArg>,

    /// Report every back edge; shorthand for `--mode every-back-edge`
    #[arg(long, conflicts_with = "mode")]
    pub all: bool,
}

impl CyclesArgs {
    /// The mode requested on the command line, if any.
    pub fn requested_mode(&self) -> Option<CycleSearchArg> {
        if self.all {
            Some(CycleSearchArg::EveryBackEdge)
        } else {
            self.mode
        }
    }
}

/// Arguments for the `impact` command
#[derive(Parser, Debug, Clone)]
pub struct ImpactArgs {
    /// Application id or code (digits are tried as an id first, then as a code)
    pub app: AppSelector,
}
