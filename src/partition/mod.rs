//! Partition administration: community registry, aggregates, neighbor cache
//! and the [`MutableVertexPartition`] built from them.

mod aggregates;
mod cache;
mod mutable;
mod registry;
mod transfer;

pub use aggregates::CommunityAggregates;
pub use cache::NeighborWeights;
pub use mutable::MutableVertexPartition;

#[cfg(test)]
mod tests;
