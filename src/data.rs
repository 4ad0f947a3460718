pub mod concurrency;
pub mod loader;
pub mod normalize;
pub mod parser;
