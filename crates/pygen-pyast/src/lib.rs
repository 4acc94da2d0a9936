//! A minimal model of the Python abstract syntax tree, scoped to the node
//! shapes a schema-driven code generator emits: class definitions, annotated
//! field assignments, type-annotation expressions, and import statements.
//!
//! The model is deliberately not a full Python grammar. Rendering the tree
//! to source text is a separate concern handled by an external
//! pretty-printer; this crate only guarantees structural fidelity and
//! equality, which is what the [`merge`] engine and the compiler tests rely
//! on.

mod expr;
mod imports;
pub mod merge;
mod stmt;

pub use expr::Constant;
pub use expr::Expr;
pub use expr::KeywordArg;
pub use imports::import_statements;
pub use stmt::ClassDef;
pub use stmt::FunctionDef;
pub use stmt::Parameter;
pub use stmt::Stmt;
