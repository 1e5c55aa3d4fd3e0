//! The graph collaborator of a partition.
//!
//! Partitions only read the graph through [`CommunityGraph`]; [`Graph`] is the
//! crate's CSR implementation, including coarsening via [`Graph::collapse`].

mod collapse;
pub mod config;
pub mod csr;
pub mod direction;
pub mod traits;

pub use config::GraphConfig;
pub use csr::Graph;
pub use direction::Direction;
pub use traits::CommunityGraph;
