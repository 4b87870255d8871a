//! Error types for the troubleshooting wizard.
//!
//! This module defines a hierarchical error system:
//! - [`AppError`]: Failures that stop the host binary
//! - [`GraphValidationError`]: Broken wizard content, raised once at load time
//! - [`TraversalError`]: Contract violations while walking a wizard
//! - [`StorageError`]: Durable storage failures
//! - [`ConfigError`]: Configuration errors
//!
//! All errors implement `Send + Sync` for async compatibility.

use thiserror::Error;

/// Top-level application error.
///
/// Every failure that stops the host binary. Broken wizards and rejected
/// traversal inputs are handled where they occur and never end up here.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The export document could not be written.
    #[error("Export error: {0}")]
    Export(#[from] serde_json::Error),
}

/// Wizard content errors.
///
/// Raised while turning a wizard definition into a
/// [`DiagnosticGraph`](crate::graph::DiagnosticGraph). A wizard whose content
/// fails validation is declined by the catalog; the error never reaches
/// the traversal engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphValidationError {
    /// The definition could not be read or parsed.
    #[error("Invalid definition for {wizard}: {message}")]
    InvalidDefinition {
        /// The wizard being loaded.
        wizard: String,
        /// Description of the parse failure.
        message: String,
    },

    /// The source has no definition for this wizard.
    #[error("Unknown wizard: {wizard}")]
    UnknownWizard {
        /// The requested wizard.
        wizard: String,
    },

    /// The graph has no nodes.
    #[error("Graph has no nodes")]
    Empty,

    /// Two nodes share an id.
    #[error("Duplicate node id: {node_id}")]
    DuplicateNode {
        /// The repeated id.
        node_id: String,
    },

    /// The designated root is not a node of the graph.
    #[error("Root node not found: {root}")]
    MissingRoot {
        /// The root id that did not resolve.
        root: String,
    },

    /// An edge points at a node that does not exist.
    #[error("Dangling edge from {node_id} to {target}")]
    DanglingEdge {
        /// The node owning the edge.
        node_id: String,
        /// The target id that did not resolve.
        target: String,
    },

    /// A safety gate is missing one of its two edges.
    #[error("Safety gate {node_id} is missing its {edge} edge")]
    IncompleteGate {
        /// The gate node.
        node_id: String,
        /// The missing edge tag.
        edge: String,
    },

    /// A node carries edges its kind does not allow.
    #[error("Node {node_id} of kind {kind} cannot have {edge} edges")]
    UnexpectedEdges {
        /// The offending node.
        node_id: String,
        /// The node's kind.
        kind: String,
        /// The edge family that is not allowed.
        edge: String,
    },

    /// Two choices on one node share a label.
    #[error("Node {node_id} has duplicate choice label: {label}")]
    DuplicateChoice {
        /// The offending node.
        node_id: String,
        /// The repeated label.
        label: String,
    },

    /// A stop node has no continuation and dead ends are rejected.
    #[error("Stop node {node_id} is a dead end")]
    DeadEndStop {
        /// The dead-end stop.
        node_id: String,
    },
}

/// Traversal contract violations.
///
/// The presentation layer is expected never to trigger these; when it does,
/// the engine state is left untouched and the caller simply re-renders.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TraversalError {
    /// The supplied choice is not valid for the current node.
    #[error("Invalid transition from {node_id}: {reason}")]
    InvalidTransition {
        /// The node the engine is at.
        node_id: String,
        /// Why the choice was rejected.
        reason: String,
    },

    /// `back` was called with an empty path.
    #[error("No history to go back to")]
    NoHistory,
}

/// Storage errors.
///
/// These errors represent failures of the durable storage collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Failed to connect to the database.
    #[error("Database connection failed: {message}")]
    ConnectionFailed {
        /// Description of the connection failure.
        message: String,
    },

    /// A database query failed.
    #[error("Query failed: {query} - {message}")]
    QueryFailed {
        /// The query that failed (may be truncated).
        query: String,
        /// Description of the failure.
        message: String,
    },

    /// Database migration failed.
    #[error("Migration failed: {version} - {message}")]
    MigrationFailed {
        /// The migration version that failed.
        version: String,
        /// Description of the failure.
        message: String,
    },

    /// Persisted data exists but cannot be decoded.
    #[error("Corrupt stored data: {message}")]
    Corrupt {
        /// Description of the decode failure.
        message: String,
    },

    /// Records could not be encoded for storage.
    #[error("Serialization failed: {message}")]
    Serialization {
        /// Description of the encode failure.
        message: String,
    },

    /// Internal storage error.
    #[error("Internal storage error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

/// Configuration errors.
///
/// These errors represent failures in configuration loading and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Configuration value is invalid.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue {
        /// The variable name.
        var: String,
        /// Why the value is invalid.
        reason: String,
    },
}
