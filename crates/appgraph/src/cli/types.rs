//! CLI value enums and domain type conversions.

use clap::ValueEnum;

use crate::graph::CycleSearch;

/// Cycle search mode for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleSearchArg {
    /// Report at most one cycle per search root
    #[value(name = "first-per-root")]
    FirstPerRoot,
    /// Report a cycle for every back edge found
    #[value(name = "every-back-edge")]
    EveryBackEdge,
}

impl std::fmt::Display for CycleSearchArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FirstPerRoot => write!(f, "first-per-root"),
            Self::EveryBackEdge => write!(f, "every-back-edge"),
        }
    }
}

impl From<CycleSearchArg> for CycleSearch {
    fn from(arg: CycleSearchArg) -> Self {
        match arg {
            CycleSearchArg::FirstPerRoot => CycleSearch::FirstPerRoot,
            CycleSearchArg::EveryBackEdge => CycleSearch::EveryBackEdge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_domain_names() {
        for arg in [CycleSearchArg::FirstPerRoot, CycleSearchArg::EveryBackEdge] {
            assert_eq!(arg.to_string(), CycleSearch::from(arg).to_string());
        }
    }
}
