#![forbid(unsafe_code)]
//! chomp-graph library.
//!
//! A small directed-graph ADT: insertion-ordered vertices with optional
//! labels, idempotent edge insertion, reachability, transposition, a DOT
//! export and a [`petgraph`] bridge for the algorithms built on top of it.
//!
//! # Conventions
//!
//! - **Errors**: queries on absent vertices return [`GraphError`].
//! - **Logging**: Use `tracing` macros (`debug!`, `trace!`).

mod digraph;
mod dot;
mod error;

pub use digraph::DirectedGraph;
pub use error::GraphError;
