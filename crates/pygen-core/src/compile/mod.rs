//! The per-category compilers and the [`generate`] entry point that
//! drives them.

pub(crate) mod documents;
mod enums;
mod fields;
mod fragments;
mod inputs;
mod operations;
mod variables;

use pygen_pyast::Stmt;

use crate::ast;
use crate::config::GeneratorConfig;
use crate::dependencies;
use crate::errors::GenerateError;
use crate::referencer::ReferenceRegistry;
use crate::registry::ClassRegistry;
use crate::schema::Schema;

/// The result of a generation run: import statements and a flat, ordered
/// module body, ready for a pretty-printer or the symbol merge engine.
#[derive(Debug)]
pub struct GeneratedModule {
    pub imports: Vec<Stmt>,
    pub body: Vec<Stmt>,
}

impl GeneratedModule {
    /// The full module as one statement list.
    pub fn statements(self) -> Vec<Stmt> {
        let mut statements = self.imports;
        statements.extend(self.body);
        statements
    }
}

/// Compile a schema plus a set of executable documents into a Python
/// module.
///
/// Phases run in dependency order against one registry: enums, inputs,
/// fragments (topologically sorted by spread), operations, then imports
/// and the forward-reference post-pass.
pub fn generate(
    schema: &Schema,
    documents: &[ast::query::Document],
    config: &GeneratorConfig,
) -> Result<GeneratedModule, GenerateError> {
    if documents.iter().all(|doc| doc.definitions.is_empty()) {
        return Err(GenerateError::NoDocumentsFound);
    }

    let references = ReferenceRegistry::scan(schema, documents)
        .map_err(|error| error.at_stage("reference scan"))?;
    let mut registry = ClassRegistry::new(config);
    let mut body = Vec::new();

    body.extend(
        enums::generate_enums(schema, &references, config, &mut registry)
            .map_err(|error| error.at_stage("enums"))?,
    );
    body.extend(
        inputs::generate_inputs(schema, &references, config, &mut registry)
            .map_err(|error| error.at_stage("inputs"))?,
    );

    let sorted = dependencies::sorted_fragments(documents)?;
    log::debug!("compiling {} fragments", sorted.len());
    for fragment in sorted {
        body.extend(
            fragments::generate_fragment(fragment, schema, config, &mut registry)
                .map_err(|error| error.at_stage("fragments"))?,
        );
    }

    for document in documents {
        for definition in &document.definitions {
            if let graphql_parser::query::Definition::Operation(operation) = definition {
                body.extend(
                    operations::generate_operation(operation, schema, config, &mut registry)
                        .map_err(|error| error.at_stage("operations"))?,
                );
            }
        }
    }

    body.extend(registry.forward_ref_statements());

    Ok(GeneratedModule {
        imports: registry.import_statements(),
        body,
    })
}
