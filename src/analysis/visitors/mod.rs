// src/analysis/visitors/mod.rs
//! Metric visitors. Each one is constructed fresh per file, traverses the
//! tree once, and accumulates findings into its own state; instances are
//! never reused across files.

pub mod complexity;
pub mod docstring;
pub mod imports;
pub mod scalability;

pub use complexity::ComplexityVisitor;
pub use docstring::DocstringVisitor;
pub use imports::ImportUsageVisitor;
pub use scalability::ScalabilityVisitor;
