//! System prompt templates.
//!
//! Each template embeds the schema descriptor so the model sees the same
//! labels and properties on every call.

use phenomix_core::SCHEMA_DESCRIPTOR;
use serde_json::Value;

/// System prompt asking for a single Cypher statement answering the question.
pub fn translate_system_prompt() -> String {
    format!(
        r#"
You are a cypher generation expert. Given a question, use neo4j database schema and the properties of each node type
to generate cypher that will best answer the question. Only return the cypher and no other text. When necessary, feel free to
generate complex cypher queries, like ones that use the APOC plugin.

{schema}

Return your response in the following format: ```cypher```

Note that the following warnings are common; avoid them by all means: If you're using UNION, alias the names to match. For example

MATCH(cc:CreditCard)
RETURN cc
UNION
MATCH(dc:DebitCard)
RETURN dc

must be

MATCH(cc:CreditCard)
RETURN cc AS Card
UNION
MATCH(dc:DebitCard)
RETURN dc AS Card

Take a close look at the properties you're using. If they have spaces in between them, account for them.
"#,
        schema = SCHEMA_DESCRIPTOR
    )
}

/// System prompt asking the model to answer from executed query results.
pub fn interpret_system_prompt(cypher: &str, rows: &[Value]) -> String {
    let results = serde_json::to_string(rows).unwrap_or_else(|_| "[]".to_string());
    format!(
        r#"
You are a cypher interpretation expert. The cypher, {cypher}, has been generated given a question about a phenotype database. Running
the cypher returns {results}. Answer the question concisely such that you are speaking to an epidemiologist using the relevant cypher results.
If not necessary or explicitly requested by the question, do not return any database logistical information like id.
Do not include any outside information.

{schema}
"#,
        cypher = cypher,
        results = results,
        schema = SCHEMA_DESCRIPTOR
    )
}

/// System prompt asking for a per-source JSON summary of one phenotype.
pub fn summarize_system_prompt() -> &'static str {
    r#"
You are a phenotype database summarization expert. Phenotypes are sourced from the Sentinel, CPRD, HDRUK, PheKB, and OHDSI databases.
Given a raw description of a phenotype, summarize the description from each database to be used in research protocols
in a RFC 8259 compliant JSON in the following format:

{
 name: string,
 sentinel_summary: string,
 cprd_summary: string,
 hdruk_summary: string,
 ohdsi_summary: string,
 phekb_summary: string
}

If there is no detail specified for a specific database, leave the string empty. Do not return anything else but the JSON.
"#
}
