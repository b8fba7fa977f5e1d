//! Orbit resolution and retrieval

pub mod resolver;
pub mod pipeline;
pub mod batch;

// Re-export main types
pub use resolver::{OrbitResolver, select_containing};
pub use pipeline::RetrievalPipeline;
pub use batch::{BatchRunner, BatchReport};
