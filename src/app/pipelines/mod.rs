pub mod election_pipeline;

pub use election_pipeline::ElectionPipeline;
