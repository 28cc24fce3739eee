//! Output formatting for CLI commands.
//!
//! Every result can be printed as human-readable text or as JSON for
//! programmatic use. Text renderers write to any [`Write`] so they can be
//! tested against a buffer; the `print_*` functions lock stdout and pick the
//! renderer from an [`OutputMode`].
//!
//! Submodules:
//! - [`color`]: Color and styling helpers
//! - [`tree`]: Dependency tree rendering with ASCII/Unicode connectors

pub mod color;
pub mod tree;

use crate::domain::DependencyRecord;
use crate::graph::{Cycle, DependencyPath, DependencyTree, GraphSnapshot, ImpactReport, ImpactedApp};
use crate::query::GraphStatsReport;
use serde::Serialize;
use std::collections::BTreeMap;
use std::env;
use std::io::{self, Write};

pub use color::{error, info, success, warning};
pub use tree::write_tree;

use color::{bold, colorize_code, colorize_criticality, colorize_status, dimmed};

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use ASCII-only connectors and icons instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new `OutputConfig` with explicit values.
    #[must_use]
    pub fn new(use_ascii: bool, use_colors: bool) -> Self {
        Self {
            use_ascii,
            use_colors,
        }
    }

    /// Create an `OutputConfig` by reading from environment variables.
    ///
    /// Reads:
    /// - `APPGRAPH_ASCII`: Set to "1" or "true" for ASCII-only output (default: false)
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `APPGRAPH_COLOR`: Set to "0" or "false" to disable colors (default: true)
    #[must_use]
    pub fn from_env() -> Self {
        let use_ascii = match env::var("APPGRAPH_ASCII") {
            Ok(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Ok(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Ok(v) => {
                tracing::warn!(
                    env_var = "APPGRAPH_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            Err(_) => false,
        };

        // https://no-color.org/
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("APPGRAPH_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self {
            use_ascii,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_ascii: false,
            use_colors: true,
        }
    }
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

fn emit<T, F>(value: &T, mode: OutputMode, text: F) -> io::Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&mut io::StdoutLock<'static>, &OutputConfig) -> io::Result<()>,
{
    let mut handle = io::stdout().lock();
    match mode {
        OutputMode::Text => text(&mut handle, &OutputConfig::from_env()),
        OutputMode::Json => write_json(&mut handle, value),
    }
}

/// Print the full graph in the specified format
pub fn print_graph(graph: &GraphSnapshot, mode: OutputMode) -> io::Result<()> {
    emit(graph, mode, |w, config| write_graph_text(w, graph, config))
}

/// Print registry statistics in the specified format
pub fn print_stats(stats: &GraphStatsReport, mode: OutputMode) -> io::Result<()> {
    emit(stats, mode, |w, config| write_stats_text(w, stats, config))
}

/// Print a dependency tree in the specified format
pub fn print_tree(tree: &DependencyTree, mode: OutputMode) -> io::Result<()> {
    emit(tree, mode, |w, config| write_tree(w, tree, config))
}

/// Print a path search result; `None` means the target is unreachable.
///
/// JSON mode prints `null` for an unreachable target.
pub fn print_path(
    from: &str,
    to: &str,
    path: Option<&DependencyPath>,
    mode: OutputMode,
) -> io::Result<()> {
    emit(&path, mode, |w, config| write_path_text(w, from, to, path, config))
}

/// Print circular dependencies in the specified format
pub fn print_cycles(cycles: &[Cycle], mode: OutputMode) -> io::Result<()> {
    emit(cycles, mode, |w, config| write_cycles_text(w, cycles, config))
}

/// Print critical dependency records in the specified format
pub fn print_critical(records: &[DependencyRecord], mode: OutputMode) -> io::Result<()> {
    emit(records, mode, |w, config| write_critical_text(w, records, config))
}

/// Print an impact report in the specified format
pub fn print_impact(report: &ImpactReport, mode: OutputMode) -> io::Result<()> {
    emit(report, mode, |w, config| write_impact_text(w, report, config))
}

fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{json}")
}

// ============================================================================
// Text Formatting
// ============================================================================

fn write_graph_text<W: Write>(
    w: &mut W,
    graph: &GraphSnapshot,
    config: &OutputConfig,
) -> io::Result<()> {
    if graph.nodes().is_empty() {
        writeln!(w, "No applications registered.")?;
        return Ok(());
    }

    writeln!(
        w,
        "{} ({} applications, {} dependencies)",
        bold("Applications", config),
        graph.total_apps(),
        graph.total_dependencies()
    )?;
    for node in graph.nodes() {
        writeln!(
            w,
            "  {} {} {}  {}  {}",
            dimmed(&format!("#{}", node.id), config),
            colorize_code(&node.code, config),
            node.display_name,
            node.node_type,
            colorize_status(node.status, config)
        )?;
        writeln!(
            w,
            "      {} {}  {} {}  {} {}",
            dimmed("deps:", config),
            node.dependencies_count,
            dimmed("dependents:", config),
            node.dependents_count,
            dimmed("routes:", config),
            node.routes_count
        )?;
    }

    if graph.edges().is_empty() {
        return Ok(());
    }

    writeln!(w)?;
    writeln!(w, "{}", bold("Dependencies", config))?;
    let arrow = if config.use_ascii { "->" } else { "→" };
    for edge in graph.edges() {
        let target = graph
            .node(edge.target)
            .map_or_else(|| format!("#{}", edge.target), |node| node.code.clone());
        let source = graph
            .node(edge.source)
            .map_or_else(|| format!("#{}", edge.source), |node| node.code.clone());
        writeln!(
            w,
            "  {} {} {}  {} [{}, {}]",
            colorize_code(&source, config),
            dimmed(arrow, config),
            colorize_code(&target, config),
            edge.name,
            edge.edge_type,
            colorize_criticality(edge.criticality, config)
        )?;
    }

    Ok(())
}

fn write_counts<W: Write>(
    w: &mut W,
    title: &str,
    counts: &BTreeMap<String, usize>,
    config: &OutputConfig,
) -> io::Result<()> {
    if counts.is_empty() {
        return Ok(());
    }
    writeln!(w)?;
    writeln!(w, "{}:", bold(title, config))?;
    for (key, count) in counts {
        writeln!(w, "  {key}: {count}")?;
    }
    Ok(())
}

fn write_stats_text<W: Write>(
    w: &mut W,
    stats: &GraphStatsReport,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{}", bold("Registry Statistics", config))?;
    writeln!(w, "  {} {}", dimmed("Applications:", config), stats.total_applications)?;
    writeln!(w, "  {} {}", dimmed("Dependencies:", config), stats.total_dependencies)?;
    writeln!(w, "  {} {}", dimmed("Graph edges:", config), stats.total_edges)?;

    write_counts(w, "By type", &stats.by_type, config)?;
    write_counts(w, "By status", &stats.by_status, config)?;
    write_counts(w, "By category", &stats.by_category, config)
}

fn write_path_text<W: Write>(
    w: &mut W,
    from: &str,
    to: &str,
    path: Option<&DependencyPath>,
    config: &OutputConfig,
) -> io::Result<()> {
    let Some(path) = path else {
        writeln!(
            w,
            "{}",
            warning(&format!("No dependency path from {from} to {to}"), config)
        )?;
        return Ok(());
    };

    let arrow = if config.use_ascii { " -> " } else { " → " };
    let chain: Vec<String> = path
        .path
        .iter()
        .map(|code| colorize_code(code, config))
        .collect();
    writeln!(w, "{}", chain.join(&dimmed(arrow, config)))?;
    writeln!(
        w,
        "{} {} hop(s)",
        dimmed("Length:", config),
        path.length
    )
}

fn write_cycles_text<W: Write>(
    w: &mut W,
    cycles: &[Cycle],
    config: &OutputConfig,
) -> io::Result<()> {
    if cycles.is_empty() {
        writeln!(w, "{}", success("No circular dependencies found.", config))?;
        return Ok(());
    }

    writeln!(
        w,
        "{}",
        error(&format!("Found {} circular dependency chain(s):", cycles.len()), config)
    )?;
    let arrow = if config.use_ascii { " -> " } else { " → " };
    for (i, cycle) in cycles.iter().enumerate() {
        let ids: Vec<String> = cycle.ids().iter().map(ToString::to_string).collect();
        writeln!(w, "  {}. {}", i + 1, ids.join(arrow))?;
    }
    Ok(())
}

fn write_critical_text<W: Write>(
    w: &mut W,
    records: &[DependencyRecord],
    config: &OutputConfig,
) -> io::Result<()> {
    if records.is_empty() {
        writeln!(w, "No critical dependencies.")?;
        return Ok(());
    }

    writeln!(w, "Found {} critical dependency record(s):", records.len())?;
    writeln!(w)?;
    let arrow = if config.use_ascii { "->" } else { "→" };
    for record in records {
        let provider = record
            .provider_id
            .map_or_else(|| "external".to_string(), |id| format!("#{id}"));
        writeln!(
            w,
            "  {} #{} {} {}  {} [{}]",
            dimmed(&format!("dep-{}", record.id), config),
            record.consumer_id,
            dimmed(arrow, config),
            provider,
            record.name,
            record.dependency_type
        )?;
    }
    Ok(())
}

fn write_impacted<W: Write>(
    w: &mut W,
    title: &str,
    apps: &[ImpactedApp],
    config: &OutputConfig,
) -> io::Result<()> {
    if apps.is_empty() {
        return Ok(());
    }
    writeln!(w)?;
    writeln!(w, "{} ({}):", bold(title, config), apps.len())?;
    for app in apps {
        writeln!(
            w,
            "  {} {}  {}",
            colorize_code(&app.app_code, config),
            app.app_name,
            dimmed(&format!("depth {}", app.depth), config)
        )?;
    }
    Ok(())
}

fn write_impact_text<W: Write>(
    w: &mut W,
    report: &ImpactReport,
    config: &OutputConfig,
) -> io::Result<()> {
    if report.total_affected() == 0 {
        writeln!(
            w,
            "{}",
            success(
                &format!("Nothing depends on {}.", report.app_code),
                config
            )
        )?;
        return Ok(());
    }

    writeln!(
        w,
        "{} affects {} application(s), up to {} hop(s) away",
        colorize_code(&report.app_code, config),
        report.total_affected(),
        report.max_depth_reached
    )?;
    write_impacted(w, "Direct dependents", &report.direct_dependents, config)?;
    write_impacted(w, "Transitive dependents", &report.transitive_dependents, config)
}
