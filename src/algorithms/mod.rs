pub mod a_star;
pub mod bfs;
pub mod binary_heap;
pub mod common;
