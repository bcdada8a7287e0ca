pub mod pipeline;
pub mod types;

pub use pipeline::ResearchPipeline;
pub use types::*;
