pub mod cli;
pub mod data;
pub mod dataset;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod stats;
