//! Neo4j connection client.

use neo4rs::{BoltType, ConfigBuilder, Graph, Query, Row};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{GraphError, GraphResult};

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: usize,
    pub fetch_size: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: String::new(),
            database: "neo4j".to_string(),
            max_connections: 4,
            fetch_size: 200,
        }
    }
}

/// Query parameters, bound by name.
pub type Params<'a> = Vec<(&'a str, BoltType)>;

/// Client for the phenotype graph.
///
/// Each statement borrows a connection from a small pool and returns it
/// when the statement completes; no transaction spans several statements.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Create a new GraphClient from config.
    ///
    /// `Graph::connect` only builds the pool, so a `RETURN 1` ping forces a
    /// real bolt handshake and surfaces connection problems here.
    pub async fn connect(config: &GraphConfig) -> GraphResult<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .db(config.database.as_str())
            .max_connections(config.max_connections)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(GraphError::Config)?;

        let connection_error = |source| GraphError::Connection {
            uri: config.uri.clone(),
            source,
        };

        let graph = Graph::connect(neo4j_config).await.map_err(connection_error)?;

        graph
            .run(Query::new("RETURN 1".to_string()))
            .await
            .map_err(connection_error)?;

        debug!(uri = %config.uri, db = %config.database, "Connected to Neo4j");
        Ok(Self { graph })
    }

    /// Execute a Cypher statement and collect all rows.
    pub async fn query(&self, cypher: &str, params: Params<'_>) -> GraphResult<Vec<Row>> {
        let mut query = Query::new(cypher.to_string());
        for (key, value) in params {
            query = query.param(key, value);
        }

        let mut stream = self
            .graph
            .execute(query)
            .await
            .map_err(|e| GraphError::query(cypher, e))?;

        let mut rows = Vec::new();
        while let Some(row) = stream.next().await.map_err(|e| GraphError::query(cypher, e))? {
            rows.push(row);
        }

        debug!(rows = rows.len(), "Query returned");
        Ok(rows)
    }

    /// Execute a Cypher query and return a single scalar value.
    pub async fn query_scalar<T: DeserializeOwned>(
        &self,
        cypher: &str,
        params: Params<'_>,
        field: &str,
    ) -> GraphResult<Option<T>> {
        let rows = self.query(cypher, params).await?;
        match rows.into_iter().next() {
            Some(row) => row
                .get::<T>(field)
                .map(Some)
                .map_err(|e| GraphError::decode(field, e)),
            None => Ok(None),
        }
    }

    /// Get node and relationship counts for status display.
    pub async fn get_counts(&self) -> GraphResult<GraphCounts> {
        let nodes: i64 = self
            .query_scalar("MATCH (n) RETURN count(n) AS count", Vec::new(), "count")
            .await?
            .unwrap_or(0);
        let relationships: i64 = self
            .query_scalar("MATCH ()-[r]->() RETURN count(r) AS count", Vec::new(), "count")
            .await?
            .unwrap_or(0);
        let phenotypes: i64 = self
            .query_scalar("MATCH (p:phenotype) RETURN count(p) AS count", Vec::new(), "count")
            .await?
            .unwrap_or(0);

        Ok(GraphCounts {
            nodes: nodes.max(0) as usize,
            relationships: relationships.max(0) as usize,
            phenotypes: phenotypes.max(0) as usize,
        })
    }
}

/// Node and relationship counts.
#[derive(Debug, Clone)]
pub struct GraphCounts {
    pub nodes: usize,
    pub relationships: usize,
    pub phenotypes: usize,
}
