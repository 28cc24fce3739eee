//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Critical/Broken: red     (critical dependencies, cycles, errors)
//!   - Warning:         yellow  (high criticality, deprecated apps)
//!   - Healthy:         green   (active apps, "no cycles")
//!   - Reference:       cyan    (application codes, tree root)
//!   - Muted:           dimmed  (connectors, low/optional criticality, ids)
//!   - Emphasis:        bold    (section headers)

use crate::domain::{AppStatus, Criticality};
use colored::Colorize;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply semantic "info" color (cyan) to text.
pub fn info(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Colorize an application code (cyan).
pub(crate) fn colorize_code(code: &str, config: &OutputConfig) -> String {
    info(code, config)
}

/// Apply color to a criticality level.
pub(crate) fn colorize_criticality(criticality: Criticality, config: &OutputConfig) -> String {
    let text = criticality.as_str();
    if !config.use_colors {
        return text.to_string();
    }
    match criticality {
        Criticality::Critical => text.red().bold().to_string(),
        Criticality::High => text.yellow().to_string(),
        Criticality::Medium => text.to_string(),
        Criticality::Low | Criticality::Optional => text.dimmed().to_string(),
    }
}

/// Apply color to an application status.
pub(crate) fn colorize_status(status: AppStatus, config: &OutputConfig) -> String {
    let text = status.as_str();
    if !config.use_colors {
        return text.to_string();
    }
    match status {
        AppStatus::Active => text.green().to_string(),
        AppStatus::Development => text.to_string(),
        AppStatus::Deprecated => text.yellow().to_string(),
        AppStatus::Archived => text.dimmed().to_string(),
    }
}
