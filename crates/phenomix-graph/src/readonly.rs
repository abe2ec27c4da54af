//! Read-only guard for model-generated Cypher.
//!
//! The check is lexical: string literals, quoted identifiers and comments are
//! blanked out, then every remaining keyword and procedure name is compared
//! against the write clauses Cypher offers. `CALL` only accepts procedures
//! known to read; anything else after it is rejected.

use std::fmt;

use crate::error::{GraphError, GraphResult};

/// A write construct found in a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteClause {
    /// A write keyword such as `CREATE` or `DETACH DELETE`.
    Keyword(String),
    /// A procedure known to modify the database.
    Procedure(String),
}

impl fmt::Display for WriteClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteClause::Keyword(k) => write!(f, "{} clause", k),
            WriteClause::Procedure(p) => write!(f, "procedure {}", p),
        }
    }
}

const WRITE_KEYWORDS: &[&str] = &[
    "CREATE", "MERGE", "DELETE", "DETACH", "SET", "REMOVE", "DROP", "FOREACH", "LOAD",
];

/// Procedures `CALL` may invoke. Entries ending in `.` match a namespace.
const READ_PROCEDURES: &[&str] = &[
    "db.labels",
    "db.relationshiptypes",
    "db.propertykeys",
    "db.schema.",
    "db.indexes",
    "db.constraints",
    "db.index.fulltext.querynodes",
    "db.index.fulltext.queryrelationships",
    "apoc.meta.",
    "apoc.path.",
    "apoc.neighbors.",
];

/// Write procedures and functions, also rejected outside `CALL`.
const WRITE_PROCEDURE_PREFIXES: &[&str] = &[
    "apoc.create",
    "apoc.merge",
    "apoc.refactor",
    "apoc.periodic",
    "apoc.do.",
    "apoc.cypher.",
    "apoc.schema.",
    "apoc.atomic.",
    "apoc.nodes.",
    "apoc.lock.",
    "apoc.trigger",
    "apoc.load",
    "apoc.import",
    "apoc.export",
    "apoc.graph.",
    "db.create",
    "dbms.",
];

/// Reject a query containing any write clause.
pub fn check_read_only(cypher: &str) -> GraphResult<()> {
    match find_write_clause(cypher) {
        Some(clause) => Err(GraphError::WriteRejected {
            clause,
            query: cypher.to_string(),
        }),
        None => Ok(()),
    }
}

/// First write clause in the query, if any.
pub fn find_write_clause(cypher: &str) -> Option<WriteClause> {
    let code = strip_literals(cypher);
    let mut previous: Option<char> = None;
    let mut after_call = false;
    let mut chars = code.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if !is_word_start(c) {
            if !c.is_whitespace() {
                previous = Some(c);
                if after_call {
                    // `CALL {` opens a subquery, screened like the outer query;
                    // anything else is a procedure name the screen cannot read.
                    if c != '{' {
                        return Some(WriteClause::Keyword("CALL".to_string()));
                    }
                    after_call = false;
                }
            }
            continue;
        }

        let mut end = start + c.len_utf8();
        while let Some(&(i, next)) = chars.peek() {
            if is_word_char(next) || next == '.' {
                end = i + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }
        let token = &code[start..end];
        let after_dot = previous == Some('.');
        previous = token.chars().last();

        // Property access such as `n.set` is not a clause.
        if after_dot {
            continue;
        }

        if after_call {
            after_call = false;
            if !is_read_procedure(token) {
                return Some(WriteClause::Procedure(token.to_string()));
            }
            continue;
        }

        if token.contains('.') {
            let lower = token.to_ascii_lowercase();
            if WRITE_PROCEDURE_PREFIXES.iter().any(|p| lower.starts_with(p)) {
                return Some(WriteClause::Procedure(token.to_string()));
            }
            continue;
        }

        let upper = token.to_ascii_uppercase();
        if WRITE_KEYWORDS.contains(&upper.as_str()) {
            return Some(WriteClause::Keyword(upper));
        }
        after_call = upper == "CALL";
    }

    // A trailing `CALL` names no procedure.
    after_call.then(|| WriteClause::Keyword("CALL".to_string()))
}

fn is_read_procedure(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    READ_PROCEDURES.iter().any(|p| {
        if p.ends_with('.') {
            lower.starts_with(p)
        } else {
            lower == *p
        }
    })
}

fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Replace string literals, backtick identifiers and comments with spaces.
fn strip_literals(cypher: &str) -> String {
    let mut out = String::with_capacity(cypher.len());
    let mut chars = cypher.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' | '`' => {
                let quote = c;
                out.push(' ');
                while let Some(inner) = chars.next() {
                    if inner == '\\' && quote != '`' {
                        chars.next();
                    } else if inner == quote {
                        break;
                    }
                }
                out.push(' ');
            }
            '/' if chars.peek() == Some(&'/') => {
                for inner in chars.by_ref() {
                    if inner == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut last = ' ';
                for inner in chars.by_ref() {
                    if last == '*' && inner == '/' {
                        break;
                    }
                    last = inner;
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_queries_pass() {
        let queries = [
            "MATCH (p:phenotype) RETURN p.phenotypes LIMIT 10",
            "MATCH (d:sentinel_detail)-[:HAS_CONCEPT]->(c:sentinel_concept) \
             WHERE toLower(d.title) CONTAINS 'asthma' RETURN c.CID, c.description",
            "CALL db.labels() YIELD label RETURN label",
            "MATCH (n) WITH n, n.offset AS offset RETURN n ORDER BY offset",
        ];
        for q in queries {
            assert!(check_read_only(q).is_ok(), "rejected: {}", q);
        }
    }

    #[test]
    fn test_write_keywords_rejected() {
        assert_eq!(
            find_write_clause("MATCH (n) DETACH DELETE n"),
            Some(WriteClause::Keyword("DETACH".to_string()))
        );
        assert_eq!(
            find_write_clause("create (n:phenotype {phenotypes: 'x'})"),
            Some(WriteClause::Keyword("CREATE".to_string()))
        );
        assert_eq!(
            find_write_clause("MATCH (p:phenotype) SET p.name = 'x' RETURN p"),
            Some(WriteClause::Keyword("SET".to_string()))
        );
        assert!(matches!(
            check_read_only("MERGE (n:x)"),
            Err(GraphError::WriteRejected { .. })
        ));
    }

    #[test]
    fn test_keywords_inside_literals_ignored() {
        assert!(check_read_only("MATCH (p) WHERE p.phenotypes = 'Create Delete Set' RETURN p").is_ok());
        assert!(check_read_only("MATCH (p) WHERE p.note = \"it\\\"s SET\" RETURN p").is_ok());
        assert!(check_read_only("MATCH (p:`DELETE`) RETURN p").is_ok());
        assert!(check_read_only("MATCH (p) // DELETE p\nRETURN p").is_ok());
        assert!(check_read_only("MATCH (p) /* SET p.x = 1 */ RETURN p").is_ok());
    }

    #[test]
    fn test_property_names_are_not_clauses() {
        assert!(check_read_only("MATCH (n) RETURN n.set, n.create, n.delete").is_ok());
        assert!(check_read_only("MATCH (n) RETURN n.created_at, n.settings").is_ok());
    }

    #[test]
    fn test_write_procedures_rejected() {
        assert!(matches!(
            find_write_clause("CALL apoc.create.node(['x'], {}) YIELD node RETURN node"),
            Some(WriteClause::Procedure(_))
        ));
        assert!(matches!(
            find_write_clause("CALL dbms.security.createUser('a', 'b', false)"),
            Some(WriteClause::Procedure(_))
        ));
        assert!(find_write_clause("CALL apoc.meta.schema() YIELD value RETURN value").is_none());
    }

    #[test]
    fn test_call_requires_known_read_procedure() {
        let rejected = [
            "CALL apoc.cypher.runMany('MATCH (n) DETACH DELETE n;', {}) YIELD row RETURN row",
            "CALL apoc.schema.assert({}, {})",
            "MATCH (n:phenotype) CALL apoc.atomic.add(n, 'x', 1) YIELD oldValue RETURN oldValue",
            "MATCH (a), (b) CALL apoc.nodes.link([a, b], 'X') RETURN a",
            "CALL custom.cleanup()",
            "call Apoc.Cypher.RunMany('x', {})",
        ];
        for q in rejected {
            assert!(
                matches!(find_write_clause(q), Some(WriteClause::Procedure(_))),
                "accepted: {}",
                q
            );
        }

        let accepted = [
            "CALL db.labels() YIELD label RETURN label",
            "CALL db.schema.visualization()",
            "CALL db.relationshipTypes() YIELD relationshipType RETURN relationshipType",
            "MATCH (p:phenotype) CALL { WITH p MATCH (p)-[:DETAILS_ARE]->(d) RETURN count(d) AS n } RETURN p, n",
        ];
        for q in accepted {
            assert!(check_read_only(q).is_ok(), "rejected: {}", q);
        }
    }

    #[test]
    fn test_write_functions_rejected_outside_call() {
        assert!(matches!(
            find_write_clause("MATCH (n) RETURN apoc.atomic.add(n, 'x', 1)"),
            Some(WriteClause::Procedure(_))
        ));
        assert!(matches!(
            find_write_clause("MATCH (p:phenotype) CALL { WITH p CALL apoc.schema.assert({}, {}) RETURN 1 AS x } RETURN p"),
            Some(WriteClause::Procedure(_))
        ));
        assert_eq!(
            find_write_clause("MATCH (n) RETURN n CALL"),
            Some(WriteClause::Keyword("CALL".to_string()))
        );
        assert_eq!(
            find_write_clause("CALL `apoc.cypher.runMany`('MATCH (n) DELETE n;', {})"),
            Some(WriteClause::Keyword("CALL".to_string()))
        );
    }
}
