use serde::{Deserialize, Serialize};

/// Graph-level conventions that the partition administration depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Whether edges are directed.
    pub directed: bool,
    /// Count a node pairing with itself as a possible edge (`n²` instead of
    /// `n(n-1)` pairs in the null model).
    pub correct_self_loops: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            directed: false,
            correct_self_loops: false,
        }
    }
}

impl GraphConfig {
    /// Undirected configuration with default conventions.
    pub fn undirected() -> Self {
        Self::default()
    }

    /// Directed configuration with default conventions.
    pub fn directed() -> Self {
        Self {
            directed: true,
            ..Self::default()
        }
    }

    /// Same configuration with `correct_self_loops` set.
    pub fn with_self_loops(self, correct_self_loops: bool) -> Self {
        Self {
            correct_self_loops,
            ..self
        }
    }
}
