//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for appgraph using clap's
//! derive API.
//!
//! # Commands
//!
//! - `init`: Initialize a new registry
//! - `graph`: Show every application and dependency
//! - `stats`: Show registry statistics
//! - `tree`: Show what an application depends on
//! - `path`: Find the shortest dependency chain between two applications
//! - `cycles`: Detect circular dependencies
//! - `critical`: List critical dependency records
//! - `impact`: Show what breaks if an application goes away
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//! - `--dir`: Directory to search for the registry instead of the current one
//!
//! # Example
//!
//! ```bash
//! appgraph tree checkout --depth 3
//! appgraph path checkout ledger
//! appgraph --json cycles --all
//! ```

mod args;
mod execute;
mod types;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{CyclesArgs, ImpactArgs, InitArgs, PathArgs, TreeArgs};
pub use types::CycleSearchArg;

/// Appgraph - dependency analysis for an application registry
///
/// Reads applications and their dependencies from `.appgraph/` and answers
/// structural questions about the resulting graph.
#[derive(Parser, Debug)]
#[command(name = "appgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory to start the registry search from
    #[arg(long, global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new registry
    ///
    /// Creates the `.appgraph/` directory with configuration and empty
    /// application, dependency and route files.
    Init(InitArgs),

    /// Show the full dependency graph
    ///
    /// Lists every application with its dependency, dependent and route
    /// counts, followed by every dependency between registered applications.
    Graph,

    /// Show registry statistics
    Stats,

    /// Show the dependency tree of an application
    ///
    /// Each application appears at most once; later occurrences are pruned.
    Tree(TreeArgs),

    /// Find the shortest dependency path between two applications
    Path(PathArgs),

    /// Detect circular dependencies
    Cycles(CyclesArgs),

    /// List dependency records marked critical
    Critical,

    /// Show which applications depend on an application
    ///
    /// Walks dependents transitively and reports how far each one is.
    Impact(ImpactArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid arguments.
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    ///
    /// # Errors
    ///
    /// Returns any error from locating the registry or running the command.
    pub async fn execute(&self) -> Result<()> {
        use crate::app::App;
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        let base_dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        let Some(command) = &self.command else {
            println!("Appgraph application dependency analysis");
            println!("Use --help for more information");
            return Ok(());
        };

        match command {
            Commands::Init(args) => execute::execute_init(&base_dir, args).await,
            Commands::Graph => {
                let app = App::from_directory(&base_dir).await?;
                execute::execute_graph(&app, output_mode).await
            }
            Commands::Stats => {
                let app = App::from_directory(&base_dir).await?;
                execute::execute_stats(&app, output_mode).await
            }
            Commands::Tree(args) => {
                let app = App::from_directory(&base_dir).await?;
                execute::execute_tree(&app, args, output_mode).await
            }
            Commands::Path(args) => {
                let app = App::from_directory(&base_dir).await?;
                execute::execute_path(&app, args, output_mode).await
            }
            Commands::Cycles(args) => {
                let app = App::from_directory(&base_dir).await?;
                execute::execute_cycles(&app, args, output_mode).await
            }
            Commands::Critical => {
                let app = App::from_directory(&base_dir).await?;
                execute::execute_critical(&app, output_mode).await
            }
            Commands::Impact(args) => {
                let app = App::from_directory(&base_dir).await?;
                execute::execute_impact(&app, args, output_mode).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApplicationId;
    use crate::query::AppSelector;

    #[test]
    fn test_parse_no_command() {
        let cli = Cli::try_parse_from(["appgraph"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.json);
        assert!(cli.dir.is_none());
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["appgraph", "graph", "--json", "--dir", "/tmp/reg"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.dir, Some(PathBuf::from("/tmp/reg")));
        assert!(matches!(cli.command, Some(Commands::Graph)));
    }

    #[test]
    fn test_parse_init_flags() {
        let cli = Cli::try_parse_from(["appgraph", "init", "--force", "-q"]).unwrap();
        match cli.command {
            Some(Commands::Init(args)) => {
                assert!(args.force);
                assert!(args.quiet);
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_parse_tree_by_code_with_depth() {
        let cli = Cli::try_parse_from(["appgraph", "tree", "checkout", "-d", "3"]).unwrap();
        match cli.command {
            Some(Commands::Tree(args)) => {
                assert_eq!(args.app, AppSelector::Code("checkout".to_string()));
                assert_eq!(args.depth, Some(3));
            }
            _ => panic!("Expected Tree command"),
        }
    }

    #[test]
    fn test_parse_path_by_ids() {
        let cli = Cli::try_parse_from(["appgraph", "path", "1", "7"]).unwrap();
        match cli.command {
            Some(Commands::Path(args)) => {
                assert_eq!(args.from, AppSelector::Id(ApplicationId(1)));
                assert_eq!(args.to, AppSelector::Id(ApplicationId(7)));
            }
            _ => panic!("Expected Path command"),
        }
    }

    #[test]
    fn test_parse_path_requires_two_apps() {
        assert!(Cli::try_parse_from(["appgraph", "path", "1"]).is_err());
    }

    #[test]
    fn test_parse_cycles_modes() {
        let cli = Cli::try_parse_from(["appgraph", "cycles", "--mode", "every-back-edge"]).unwrap();
        match cli.command {
            Some(Commands::Cycles(args)) => {
                assert_eq!(args.requested_mode(), Some(CycleSearchArg::EveryBackEdge));
            }
            _ => panic!("Expected Cycles command"),
        }

        let cli = Cli::try_parse_from(["appgraph", "cycles", "--all"]).unwrap();
        match cli.command {
            Some(Commands::Cycles(args)) => {
                assert_eq!(args.requested_mode(), Some(CycleSearchArg::EveryBackEdge));
            }
            _ => panic!("Expected Cycles command"),
        }

        let cli = Cli::try_parse_from(["appgraph", "cycles"]).unwrap();
        match cli.command {
            Some(Commands::Cycles(args)) => assert_eq!(args.requested_mode(), None),
            _ => panic!("Expected Cycles command"),
        }
    }

    #[test]
    fn test_parse_cycles_all_conflicts_with_mode() {
        let result =
            Cli::try_parse_from(["appgraph", "cycles", "--all", "--mode", "first-per-root"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_impact_rejects_blank_app() {
        assert!(Cli::try_parse_from(["appgraph", "impact", " "]).is_err());
    }

    #[test]
    fn test_parse_critical_and_stats() {
        let cli = Cli::try_parse_from(["appgraph", "critical"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Critical)));
        let cli = Cli::try_parse_from(["appgraph", "--json", "stats"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Stats)));
    }
}
