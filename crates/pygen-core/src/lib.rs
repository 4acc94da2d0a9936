//! Compiler core for generating statically typed Python (pydantic) client
//! models from a GraphQL schema plus a set of operation and fragment
//! documents.
//!
//! The pipeline is a pure function of `(schema, documents, config)`:
//!
//! 1. [`referencer`] scans the documents and records which schema types are
//!    actually used.
//! 2. [`compile::generate`] drives the per-category compilers (enums,
//!    inputs, fragments in dependency order, operations) against one
//!    [`registry::ClassRegistry`] constructed for the run.
//! 3. The result is a flat, ordered list of Python statements plus an
//!    import list, ready for an external pretty-printer.
//!
//! Schema/document loading (files, globs, introspection over HTTP), config
//! file parsing, and rendering the final source text are collaborator
//! concerns and intentionally absent here.

pub mod ast;
pub mod compile;
pub mod config;
pub mod dependencies;
mod errors;
mod keywords;
pub mod referencer;
pub mod registry;
pub mod schema;
pub mod stylers;
pub mod types;

pub use compile::GeneratedModule;
pub use compile::generate;
pub use config::GeneratorConfig;
pub use errors::GenerateError;
pub use registry::ClassRegistry;
pub use schema::Schema;
pub use schema::SchemaBuildError;
