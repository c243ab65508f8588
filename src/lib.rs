//! cantor – a small database engine for named sets of strings.
//!
//! Values are sets of opaque strings and queries are expressions in a
//! set-algebra language: `|` union, `&` intersection, `-` difference and
//! `^` symmetric difference, all at one precedence level and
//! left-associative, with brace literals (`{'a','b'}`), references to named
//! sets and top-level assignment (`S = expr`). A query flows through
//! `Lexer → Parser → AST → evaluation`, resolving references against a
//! storage backend and persisting the canonical form of an assignment.
//!
//! ## Modules
//! * [`sets`] – the in-memory string set and the n-ary algebra over it.
//! * [`lexer`] – character stream to token stream, with one-char push-back.
//! * [`ast`] – the query tree; evaluation and canonical re-serialization.
//! * [`parser`] – recursive descent plus operator-precedence climbing.
//! * [`database`] – the facade, the backend contract and the registry.
//! * [`persist`] – the SQLite catalog backend.
//! * [`server`] – the HTTP request/response surface.
//! * [`error`] – the crate-wide error enum.
//!
//! ## Semantics worth knowing
//! * Quoted items keep their quotes: `{'a'}` materializes the element `'a'`.
//! * A named set stores the canonical re-serialization of its expression,
//!   not the original text; referencing it re-parses and re-evaluates that
//!   pattern, so dependents always see the current contents of their
//!   dependencies.
//! * An assignment whose right-hand side references the assigned name is
//!   rejected as a cyclic reference and persists nothing.
//!
//! ## Quick Start
//! ```
//! use cantor::database::Database;
//! use cantor::persist::SqliteBackend;
//!
//! let backend = SqliteBackend::open_in_memory().unwrap();
//! let mut db = Database::new("example", Box::new(backend));
//! db.query("S = {'a','b'}").unwrap();
//! let result = db.query("S | {'c'}").unwrap();
//! assert_eq!(result.items(), ["'a'", "'b'", "'c'"]);
//! ```

pub mod ast;
pub mod database;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod persist;
pub mod server;
pub mod sets;
