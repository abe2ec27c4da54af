//! In-memory store and scripted model for pipeline tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use phenomix_core::{Phenotype, PhenotypeId, Properties, Source};
use phenomix_graph::{check_read_only, GraphError, GraphResult, PhenotypeStore, SharedConcepts};
use phenomix_llm::{ChatModel, LlmError, LlmResult};
use serde_json::{json, Value};

use crate::context::ChatContext;

pub fn context(store: impl Into<Arc<MemoryStore>>, model: ScriptedModel) -> ChatContext {
    let store: Arc<MemoryStore> = store.into();
    ChatContext::new(store, Arc::new(model))
}

pub fn phenotype(id: &str, name: &str) -> Phenotype {
    Phenotype::new(PhenotypeId::parse(id).unwrap(), name)
}

pub fn props(value: Value) -> Properties {
    match value {
        Value::Object(map) => map.into_iter().collect(),
        other => panic!("expected object, got {}", other),
    }
}

/// Graph store backed by vectors.
#[derive(Default)]
pub struct MemoryStore {
    pub phenotypes: Vec<Phenotype>,
    pub details: Vec<(Source, Properties)>,
    /// `(source, detail PID, concept properties)`.
    pub concepts: Vec<(Source, String, Properties)>,
    /// `(phenotype name, CID)` reachability, in store order.
    pub links: Vec<(String, String)>,
    pub query_rows: Vec<Value>,
    /// Labels that do not exist; queries naming them fail.
    pub missing_labels: Vec<String>,
    pub lookups: Mutex<Vec<(Source, String)>>,
    pub executed: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn with_phenotypes(phenotypes: Vec<Phenotype>) -> Self {
        Self {
            phenotypes,
            ..Self::default()
        }
    }

    pub fn detail(mut self, source: Source, properties: Value) -> Self {
        self.details.push((source, props(properties)));
        self
    }

    pub fn concept(mut self, source: Source, detail_pid: &str, properties: Value) -> Self {
        self.concepts
            .push((source, detail_pid.to_string(), props(properties)));
        self
    }

    pub fn link(mut self, name: &str, cid: &str) -> Self {
        self.links.push((name.to_string(), cid.to_string()));
        self
    }

    pub fn lookups(&self) -> Vec<(Source, String)> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl PhenotypeStore for MemoryStore {
    async fn list_phenotypes(&self) -> GraphResult<Vec<Phenotype>> {
        Ok(self.phenotypes.clone())
    }

    async fn get_phenotype(&self, id: &PhenotypeId) -> GraphResult<Option<Phenotype>> {
        Ok(self.phenotypes.iter().find(|p| &p.id == id).cloned())
    }

    async fn details_by_pid(&self, source: Source, pid: &str) -> GraphResult<Vec<Properties>> {
        self.lookups
            .lock()
            .unwrap()
            .push((source, pid.to_string()));
        Ok(self
            .details
            .iter()
            .filter(|(s, p)| *s == source && p.get("PID") == Some(&json!(pid)))
            .map(|(_, p)| p.clone())
            .collect())
    }

    async fn concepts_for_detail(&self, source: Source, pid: &str) -> GraphResult<Vec<Properties>> {
        Ok(self
            .concepts
            .iter()
            .filter(|(s, d, _)| *s == source && d == pid)
            .map(|(_, _, p)| p.clone())
            .collect())
    }

    async fn concept_ids_for_phenotype(&self, name: &str) -> GraphResult<Vec<String>> {
        let mut cids: Vec<String> = Vec::new();
        for (n, cid) in &self.links {
            if n == name && !cids.contains(cid) {
                cids.push(cid.clone());
            }
        }
        Ok(cids)
    }

    async fn phenotypes_sharing_concepts(&self, cids: &[String]) -> GraphResult<Vec<SharedConcepts>> {
        let mut shared: Vec<(String, Vec<String>)> = Vec::new();
        for (name, cid) in &self.links {
            if !cids.contains(cid) {
                continue;
            }
            match shared.iter_mut().find(|(n, _)| n == name) {
                Some((_, seen)) if !seen.contains(cid) => seen.push(cid.clone()),
                Some(_) => {}
                None => shared.push((name.clone(), vec![cid.clone()])),
            }
        }
        Ok(shared
            .into_iter()
            .map(|(name, seen)| SharedConcepts {
                name,
                shared_count: seen.len() as u64,
            })
            .collect())
    }

    async fn run_query(&self, cypher: &str, allow_writes: bool) -> GraphResult<Vec<Value>> {
        if !allow_writes {
            check_read_only(cypher)?;
        }
        self.executed.lock().unwrap().push(cypher.to_string());
        if let Some(label) = self
            .missing_labels
            .iter()
            .find(|l| cypher.contains(&format!(":{}", l)))
        {
            return Err(GraphError::decode("label", format!("unknown label {}", label)));
        }
        Ok(self.query_rows.clone())
    }
}

/// Chat model replaying canned replies in order.
#[derive(Clone, Default)]
pub struct ScriptedModel {
    replies: Arc<Mutex<VecDeque<LlmResult<String>>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl ScriptedModel {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Arc::new(Mutex::new(
                replies.into_iter().map(|r| Ok(r.into())).collect(),
            )),
            calls: Arc::default(),
        }
    }

    /// A model whose every call fails.
    pub fn failing() -> Self {
        Self::default()
    }

    /// Recorded `(system, user)` message pairs.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete(&self, system: &str, user: &str) -> LlmResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyResponse))
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}
