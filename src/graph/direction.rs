//! Edge traversal direction for neighbor queries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::partition_error::PartitionError;

/// Which incident edges of a node to visit.
///
/// For undirected graphs all three modes visit the same incidence list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Edges leaving the node.
    Out,
    /// Edges entering the node.
    In,
    /// Outgoing followed by incoming edges.
    All,
}

impl Direction {
    /// The two directions `move_node` walks, in order.
    pub const OUT_IN: [Direction; 2] = [Direction::Out, Direction::In];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Out => "out",
            Direction::In => "in",
            Direction::All => "all",
        };
        f.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = PartitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "out" | "outgoing" => Ok(Direction::Out),
            "in" | "incoming" => Ok(Direction::In),
            "all" | "both" => Ok(Direction::All),
            _ => Err(PartitionError::InvalidDirection(s.to_string())),
        }
    }
}
