//! Facade crate: re-exports the compiler core and the Python AST layer
//! under one roof.
//!
//! ```no_run
//! use pygen::GeneratorConfig;
//! use pygen::Schema;
//! use pygen::ast;
//! use pygen::generate;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = Schema::from_str("type Query { ok: Boolean! }")?;
//! let documents = vec![ast::query::parse("query Check { ok }")?];
//! let module = generate(&schema, &documents, &GeneratorConfig::default())?;
//! for statement in module.statements() {
//!     // hand off to a pretty-printer or the merge engine
//!     let _ = statement;
//! }
//! # Ok(())
//! # }
//! ```

pub use pygen_core::ClassRegistry;
pub use pygen_core::GenerateError;
pub use pygen_core::GeneratedModule;
pub use pygen_core::GeneratorConfig;
pub use pygen_core::Schema;
pub use pygen_core::SchemaBuildError;
pub use pygen_core::ast;
pub use pygen_core::config;
pub use pygen_core::dependencies;
pub use pygen_core::generate;
pub use pygen_core::referencer;
pub use pygen_core::registry;
pub use pygen_core::schema;
pub use pygen_core::stylers;
pub use pygen_core::types;

pub mod pyast {
    pub use pygen_pyast::ClassDef;
    pub use pygen_pyast::Constant;
    pub use pygen_pyast::Expr;
    pub use pygen_pyast::FunctionDef;
    pub use pygen_pyast::KeywordArg;
    pub use pygen_pyast::Parameter;
    pub use pygen_pyast::Stmt;
    pub use pygen_pyast::import_statements;
    pub use pygen_pyast::merge;
}
