//! PartitionError: Unified error type for community-partition public APIs
//!
//! Every error signals a programmer or invariant error, not a transient
//! condition. Operations that can fail validate their input before touching
//! any state, so a returned error leaves the partition unchanged.

use thiserror::Error;

/// Result alias for `community-partition`.
pub type Result<T> = std::result::Result<T, PartitionError>;

/// Unified error type for partition and graph operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PartitionError {
    /// An input array does not have the length the graph requires.
    #[error("{what} has length {found}, expected {expected}")]
    LengthMismatch {
        /// Which input was wrong (e.g. "membership").
        what: &'static str,
        /// Required length.
        expected: usize,
        /// Supplied length.
        found: usize,
    },
    /// A membership entry names a community id that cannot exist.
    #[error("community id {community} out of range (must be < {limit})")]
    CommunityOutOfRange {
        /// Offending community id.
        community: usize,
        /// Exclusive upper bound on community ids.
        limit: usize,
    },
    /// Creating another community would exceed the number of nodes.
    #[error(
        "cannot hold {communities} communities on {nodes} nodes; an empty community must already exist"
    )]
    TooManyCommunities {
        /// Community count that was requested.
        communities: usize,
        /// Number of nodes in the graph.
        nodes: usize,
    },
    /// A node index is not part of the graph.
    #[error("node {node} out of range (graph has {node_count} nodes)")]
    NodeOutOfRange {
        /// Offending node.
        node: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// A direction mode could not be recognised.
    #[error("invalid direction mode `{0}` (expected out, in or all)")]
    InvalidDirection(String),
    /// An edge weight is NaN or infinite.
    #[error("edge {edge} has non-finite weight {weight}")]
    InvalidWeight {
        /// Edge id.
        edge: usize,
        /// The rejected weight.
        weight: f64,
    },
    /// A node maps to a super-node the coarser partition does not have.
    #[error("node {node} maps to super-node {super_node}, but the coarser partition has {coarser_len} nodes")]
    SuperNodeOutOfRange {
        /// Node of the finer graph.
        node: usize,
        /// Super-node it maps to.
        super_node: usize,
        /// Node count of the coarser partition.
        coarser_len: usize,
    },
    /// Incrementally maintained state disagrees with its definition.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}
