//! Command execution logic.

use anyhow::Result;

use super::args::{CyclesArgs, ImpactArgs, InitArgs, PathArgs, TreeArgs};
use crate::app::App;
use crate::output::{self, OutputMode};
use std::path::Path;

/// Execute the init command
pub async fn execute_init(base_dir: &Path, args: &InitArgs) -> Result<()> {
    use crate::commands::init;

    if !args.quiet {
        println!("Initializing application registry...");
    }

    let result = init::init(base_dir, args.force).await?;

    if !args.quiet {
        println!("Initialized registry in {}", result.registry_dir.display());
        println!("  Config: {}", result.config_file.display());
        for file in &result.data_files {
            println!("  Data:   {}", file.display());
        }
    }

    Ok(())
}

/// Execute the graph command
pub async fn execute_graph(app: &App, output_mode: OutputMode) -> Result<()> {
    let graph = app.service().full_graph().await?;
    output::print_graph(&graph, output_mode)?;
    Ok(())
}

/// Execute the stats command
pub async fn execute_stats(app: &App, output_mode: OutputMode) -> Result<()> {
    let stats = app.service().stats().await?;
    output::print_stats(&stats, output_mode)?;
    Ok(())
}

/// Execute the tree command
pub async fn execute_tree(app: &App, args: &TreeArgs, output_mode: OutputMode) -> Result<()> {
    let service = app.service();
    let id = service.resolve(&args.app).await?;
    let tree = service.dependency_tree(id, args.depth).await?;
    output::print_tree(&tree, output_mode)?;
    Ok(())
}

/// Execute the path command
pub async fn execute_path(app: &App, args: &PathArgs, output_mode: OutputMode) -> Result<()> {
    let service = app.service();
    let (from, to) = tokio::try_join!(service.resolve(&args.from), service.resolve(&args.to))?;
    let path = service.find_path(from, to).await?;
    output::print_path(
        &args.from.to_string(),
        &args.to.to_string(),
        path.as_ref(),
        output_mode,
    )?;
    Ok(())
}

/// Execute the cycles command
pub async fn execute_cycles(app: &App, args: &CyclesArgs, output_mode: OutputMode) -> Result<()> {
    let search = args.requested_mode().map(Into::into);
    let cycles = app.service().circular_dependencies(search).await?;
    tracing::debug!(count = cycles.len(), "Cycle search finished");
    output::print_cycles(&cycles, output_mode)?;
    Ok(())
}

/// Execute the critical command
pub async fn execute_critical(app: &App, output_mode: OutputMode) -> Result<()> {
    let records = app.service().critical_dependencies().await?;
    output::print_critical(&records, output_mode)?;
    Ok(())
}

/// Execute the impact command
pub async fn execute_impact(app: &App, args: &ImpactArgs, output_mode: OutputMode) -> Result<()> {
    let service = app.service();
    let id = service.resolve(&args.app).await?;
    let report = service.impact(id).await?;
    output::print_impact(&report, output_mode)?;
    Ok(())
}
