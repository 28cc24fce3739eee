//! Dependency tree rendering for `appgraph tree` output.

use std::io::{self, Write};

use colored::Colorize;

use super::OutputConfig;
use super::color::{colorize_code, colorize_criticality, dimmed};
use crate::graph::DependencyTree;

/// Render a dependency tree with ASCII/Unicode connectors.
///
/// Renders a tree like:
/// ```text
/// ◆ checkout (Checkout)
/// ├── payments [api, critical]
/// │   └── ledger [database, high]
/// └── catalog [service, medium]
/// ```
pub fn write_tree<W: Write>(
    w: &mut W,
    root: &DependencyTree,
    config: &OutputConfig,
) -> io::Result<()> {
    let root_icon = if config.use_ascii { "*" } else { "◆" };
    let root_icon_str = if config.use_colors {
        root_icon.cyan().bold().to_string()
    } else {
        root_icon.to_string()
    };

    writeln!(
        w,
        "{} {} ({})",
        root_icon_str,
        colorize_code(&root.app_code, config),
        root.app_name
    )?;

    write_children(w, &root.children, &[], config)
}

/// Render tree children with connector lines.
///
/// `prefix_segments` tracks which ancestor levels still have siblings below,
/// used to draw the vertical continuation lines (`│`).
fn write_children<W: Write>(
    w: &mut W,
    children: &[DependencyTree],
    prefix_segments: &[bool],
    config: &OutputConfig,
) -> io::Result<()> {
    let (branch, corner, pipe, space) = if config.use_ascii {
        ("|-- ", "`-- ", "|   ", "    ")
    } else {
        ("├── ", "└── ", "│   ", "    ")
    };

    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;

        let mut prefix = String::new();
        for &has_more in prefix_segments {
            prefix.push_str(&dimmed(if has_more { pipe } else { space }, config));
        }
        let connector = dimmed(if is_last { corner } else { branch }, config);

        let info = child
            .dependency_info
            .as_ref()
            .map(|info| {
                format!(
                    " [{}, {}]",
                    info.dependency_type,
                    colorize_criticality(info.criticality, config)
                )
            })
            .unwrap_or_default();

        writeln!(
            w,
            "{}{}{}{}",
            prefix,
            connector,
            colorize_code(&child.app_code, config),
            info
        )?;

        if !child.children.is_empty() {
            let mut next_segments = prefix_segments.to_vec();
            next_segments.push(!is_last);
            write_children(w, &child.children, &next_segments, config)?;
        }
    }

    Ok(())
}
