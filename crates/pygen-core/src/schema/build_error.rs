use thiserror::Error;

use crate::ast;

#[derive(Debug, Error)]
pub enum SchemaBuildError {
    #[error(transparent)]
    Parse(#[from] ast::schema::ParseError),

    #[error("The schema defines more than one type named `{name}`.")]
    DuplicateTypeName { name: String },

    #[error("Type extensions are not supported.")]
    TypeExtensionsUnsupported,
}
