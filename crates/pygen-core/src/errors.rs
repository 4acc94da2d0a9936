use thiserror::Error;

use crate::dependencies::DependencyError;
use crate::registry::RegistryError;

/// Errors produced while compiling a schema and set of documents into
/// Python statements.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Dependency(#[from] DependencyError),

    #[error("No fragment named `{name}` was found in the given documents.")]
    FragmentNotFound { name: String },

    #[error("No operation or fragment definitions were found in the given documents.")]
    NoDocumentsFound,

    #[error(
        "Union type `{union_name}` cannot select field `{field_name}` directly. \
         Select union members through inline fragments instead."
    )]
    UnionFieldSelection {
        union_name: String,
        field_name: String,
    },

    #[error("Interface `{interface}` has no implementing object types in the schema.")]
    MissingImplementations { interface: String },

    #[error("No type named `{name}` is defined in the schema.")]
    UnknownType { name: String },

    #[error("Type `{type_name}` has no field named `{field_name}`.")]
    UnknownField {
        type_name: String,
        field_name: String,
    },

    #[error("Anonymous operations are not supported. Give every operation a name.")]
    UnnamedOperation,

    #[error("Unsupported construct: {0}")]
    Unsupported(String),

    #[error("Error while compiling {stage}: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: Box<GenerateError>,
    },
}

impl GenerateError {
    /// Wrap an error with the name of the compile stage it surfaced in.
    pub(crate) fn at_stage(self, stage: &'static str) -> GenerateError {
        GenerateError::Stage {
            stage,
            source: Box::new(self),
        }
    }
}
