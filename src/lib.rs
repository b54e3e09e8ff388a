//! changeme turns a generic project skeleton into a concrete repository.
//! It substitutes placeholder tokens across the tree, renames paths that
//! embed them and regenerates the platform icons from one master logo.

/// Platform icon generation and bundle discovery
pub mod assets;

/// Command-line interface module for the changeme application
pub mod cli;

/// Settings file and raw external values
/// Supports JSON and YAML formats (changeme.json, changeme.yml, changeme.yaml)
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling for the changeme application
pub mod error;

/// Excluded directories and the file name denylist
pub mod ignore;

/// Logger setup
pub mod logger;

/// Pass orchestration
pub mod processor;

/// Renaming of paths embedding placeholder tokens
pub mod renamer;

/// In-place content substitution
pub mod rewriter;

/// Placeholder token map and its substitution order
pub mod variables;

/// Deterministic tree traversal
pub mod walker;
