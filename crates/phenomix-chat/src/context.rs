//! Per-invocation pipeline context.

use std::sync::Arc;

use phenomix_graph::PhenotypeStore;
use phenomix_llm::ChatModel;

/// The store and model a pipeline run talks to.
///
/// Built once per command and passed explicitly to every step.
#[derive(Clone)]
pub struct ChatContext {
    store: Arc<dyn PhenotypeStore>,
    model: Arc<dyn ChatModel>,
    allow_writes: bool,
}

impl ChatContext {
    pub fn new(store: Arc<dyn PhenotypeStore>, model: Arc<dyn ChatModel>) -> Self {
        Self {
            store,
            model,
            allow_writes: false,
        }
    }

    /// Let generated queries through even when they contain write clauses.
    pub fn with_allow_writes(mut self, allow_writes: bool) -> Self {
        self.allow_writes = allow_writes;
        self
    }

    pub fn store(&self) -> &dyn PhenotypeStore {
        self.store.as_ref()
    }

    pub fn model(&self) -> &dyn ChatModel {
        self.model.as_ref()
    }

    pub fn allow_writes(&self) -> bool {
        self.allow_writes
    }
}
