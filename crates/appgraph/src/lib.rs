//! Appgraph - dependency analysis for an application registry.
//!
//! Applications and the dependency records between them are read from an
//! [`EntityStore`](store::EntityStore) and turned into a directed graph on
//! every query. The [`GraphService`](query::GraphService) facade answers
//! questions about that graph: the full graph with per-application metrics,
//! registry statistics, dependency trees, shortest paths, circular
//! dependencies, critical dependencies and the impact of losing an
//! application.
//!
//! The crate also ships the `appgraph` CLI, which reads a JSONL registry from
//! a `.appgraph/` directory.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod domain;
pub mod error;
pub mod graph;
pub mod query;
pub mod store;

// Public CLI module (needed by binary)
pub mod cli;

// Command implementations
pub mod commands;

pub mod app;
pub mod config;
pub mod output;

pub use error::{Error, Result};
