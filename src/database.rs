//! The database facade, the backend contract and the backend registry.
//!
//! A [`Database`] glues the query pipeline together: it parses a query,
//! unwraps a top-level assignment, evaluates the expression against a
//! resolver that chases references through the backend's catalog, and
//! persists the canonical pattern when the query was an assignment.
//!
//! Backends are constructed through a [`BackendRegistry`], an explicit
//! factory table owned by the caller. Registration is a one-shot phase:
//! once any database has been opened the registry is sealed and further
//! registrations fail.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::ast::Node;
use crate::error::{CantorError, Result};
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::sets::Set;

/// Catalog record describing a named set.
///
/// `uuid` and `ctime` are assigned by the backend on first insert and are
/// stable across upserts; `mtime` moves on every upsert. `depends_on` is the
/// ordered sequence of references visited while the assignment was
/// evaluated, duplicates preserved.
#[derive(Debug, Clone, Serialize)]
pub struct SetInfo {
    pub name: String,
    pub uuid: Uuid,
    pub ctime: DateTime<Utc>,
    pub mtime: DateTime<Utc>,
    #[serde(rename = "dependsOn")]
    pub depends_on: Vec<String>,
}

/// Catalog of named sets and their stored patterns.
///
/// The backend owns UUID generation and timestamps. The engine hands it the
/// dependency list as an ordered sequence of names; how it is serialized is
/// the backend's business.
pub trait Backend: Send {
    fn list(&self) -> Result<Vec<SetInfo>>;

    fn info(&self, name: &str) -> Result<SetInfo>;

    /// The canonical pattern previously stored for `name`.
    fn pattern(&self, name: &str) -> Result<String>;

    /// Upsert by name: a new entry gets a fresh uuid and ctime, an existing
    /// one keeps both and only has mtime, pattern and dependencies replaced.
    fn persist(&mut self, name: &str, pattern: &str, depends_on: &[String]) -> Result<()>;

    fn close(&mut self) -> Result<()>;
}

pub type BackendFactory = Box<dyn Fn(&str) -> Result<Box<dyn Backend>> + Send + Sync>;

/// Explicit factory table mapping backend names to constructors.
pub struct BackendRegistry {
    factories: BTreeMap<String, BackendFactory>,
    sealed: AtomicBool,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
            sealed: AtomicBool::new(false),
        }
    }

    /// Registers a backend under `name`. Fails on a duplicate name and once
    /// the registry has been sealed by a call to [`BackendRegistry::open`].
    pub fn register(&mut self, name: impl Into<String>, factory: BackendFactory) -> Result<()> {
        if self.sealed.load(Ordering::SeqCst) {
            return Err(CantorError::Config(
                "backend registration after open is forbidden".to_string(),
            ));
        }
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(CantorError::Config(format!("backend {name} registered twice")));
        }
        self.factories.insert(name, factory);
        Ok(())
    }

    /// The registered backend names, sorted.
    pub fn backends(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }

    /// Opens the database `dbname` through the backend registered as
    /// `backend`, sealing the registry against further registrations.
    pub fn open(&self, backend: &str, dbname: &str) -> Result<Database> {
        self.sealed.store(true, Ordering::SeqCst);
        let factory = self
            .factories
            .get(backend)
            .ok_or_else(|| CantorError::UnknownBackend(backend.to_string()))?;
        Ok(Database::new(dbname, factory(dbname)?))
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The materialized outcome of one query.
#[derive(Debug)]
pub struct ResultSet {
    items: Set,
    name: String,
    pattern: Node,
    depends_on: Vec<String>,
}

impl ResultSet {
    /// The result elements in lexicographic order.
    pub fn items(&self) -> Vec<String> {
        self.items.items()
    }

    pub fn set(&self) -> &Set {
        &self.items
    }

    /// The assigned name, empty when the query was not an assignment.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical source of the evaluated expression.
    pub fn pattern(&self) -> String {
        self.pattern.to_query()
    }

    /// Referenced set names in visit order, duplicates preserved.
    pub fn depends_on(&self) -> &[String] {
        &self.depends_on
    }
}

/// A handle on one named-set database.
pub struct Database {
    name: String,
    backend: Box<dyn Backend>,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").field("name", &self.name).finish()
    }
}

impl Database {
    pub fn new(name: impl Into<String>, backend: Box<dyn Backend>) -> Self {
        Self { name: name.into(), backend }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parses, evaluates and, when the query is an assignment, persists it.
    ///
    /// References are resolved through the backend: the stored canonical
    /// pattern is fetched, parsed with a fresh parser and evaluated with the
    /// same resolver, so references inside stored patterns resolve
    /// recursively. A reference to the name currently being assigned fails
    /// with [`CantorError::CyclicReference`]. Nothing is persisted unless
    /// evaluation succeeded.
    pub fn query(&mut self, expression: &str) -> Result<ResultSet> {
        let parsed = Parser::new(Lexer::new(expression)).parse()?;

        let (name, expr) = match parsed {
            Node::Assign { name, expr } => (name, *expr),
            node => (String::new(), node),
        };

        let mut depends_on: Vec<String> = Vec::new();
        let items = {
            let backend = &self.backend;
            let assigned = name.as_str();
            let depends = &mut depends_on;
            let mut resolve = move |set_name: &str| -> Result<Node> {
                if set_name == assigned {
                    return Err(CantorError::CyclicReference(set_name.to_string()));
                }
                let subpattern = backend.pattern(set_name)?;
                let node = Parser::new(Lexer::new(&subpattern)).parse()?;
                depends.push(set_name.to_string());
                Ok(node)
            };
            expr.evaluate(&mut resolve)?
        };

        if !name.is_empty() {
            self.backend.persist(&name, &expr.to_query(), &depends_on)?;
        }

        Ok(ResultSet { items, name, pattern: expr, depends_on })
    }

    pub fn list(&self) -> Result<Vec<SetInfo>> {
        self.backend.list()
    }

    pub fn info(&self, name: &str) -> Result<SetInfo> {
        self.backend.info(name)
    }

    pub fn close(&mut self) -> Result<()> {
        self.backend.close()
    }
}
