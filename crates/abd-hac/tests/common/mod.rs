pub mod data_gen;
pub mod graph;
