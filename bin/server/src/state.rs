//! Shared application state.

use loomflow_engine::{EngineService, InMemoryMetadataStore};
use loomflow_generate::{GraphBuilder, PatternMatcher};

/// State shared by all request handlers.
#[derive(Debug)]
pub struct AppState {
    /// Prompt classifier.
    pub matcher: PatternMatcher,
    /// Workflow assembler.
    pub builder: GraphBuilder,
    /// Engine gateway and metadata service.
    pub engine: EngineService<InMemoryMetadataStore>,
}

impl AppState {
    /// Creates the application state.
    #[must_use]
    pub fn new(matcher: PatternMatcher, engine: EngineService<InMemoryMetadataStore>) -> Self {
        Self {
            matcher,
            builder: GraphBuilder::new(),
            engine,
        }
    }
}
