pub mod disjoint_set;
pub mod graph;
pub mod kruskal;
pub mod logging;
pub mod maze;

pub use graph::{Edge, Graph, NodeIndex, SparseGraph};
pub use maze::{MazeConfig, MazeError, Rectangle, generate_maze};
