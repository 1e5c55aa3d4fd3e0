//! # community-partition
//!
//! community-partition is the administration core of Louvain/Leiden-style
//! community detection: a [`MutableVertexPartition`] that assigns every node
//! of a graph to a community and keeps the per-community statistics a
//! quality function needs up to date while an optimizer moves nodes around.
//!
//! ## Features
//! - Community registry with O(1) node moves and a reusable empty-id pool
//! - Incremental aggregates (`csize`, internal/outgoing/incoming weight,
//!   possible-edge totals) repaired in O(degree) per move
//! - Neighbor-community weight cache with sparse reset
//! - Canonical and explicit renumbering, graph coarsening and cross-level
//!   transfer for hierarchical optimization
//! - A CSR [`Graph`] implementing the read-only [`CommunityGraph`] trait
//!
//! ## Usage
//!
//! ```
//! use community_partition::prelude::*;
//!
//! let g = Graph::from_unweighted_edges(4, &[(0, 1), (1, 2), (2, 3)], GraphConfig::undirected())
//!     .unwrap();
//! let mut p = MutableVertexPartition::new(&g);
//! p.move_node(1, 0);
//! assert_eq!(p.total_weight_in_comm(0), 1.0);
//! assert_eq!(p.weight_to_comm(2, 0), 1.0);
//! ```
//!
//! ## Invariant checking
//!
//! Enable the `check-invariants` (or `strict-invariants`) feature to
//! validate the full administration after every move and rebuild. Checks
//! cost O(n + m) each.
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade and never installs a logger:
//! `debug` for rebuilds, renumbering, transfers and coarsening, `trace` for
//! every node move, `warn` for failed invariant checks.

pub mod debug_invariants;
pub mod graph;
pub mod partition;
pub mod partition_error;

pub use debug_invariants::DebugInvariants;
pub use graph::{CommunityGraph, Direction, Graph, GraphConfig};
pub use partition::{CommunityAggregates, MutableVertexPartition, NeighborWeights};
pub use partition_error::PartitionError;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::graph::{CommunityGraph, Direction, Graph, GraphConfig};
    pub use crate::partition::{CommunityAggregates, MutableVertexPartition, NeighborWeights};
    pub use crate::partition_error::{PartitionError, Result};
}
