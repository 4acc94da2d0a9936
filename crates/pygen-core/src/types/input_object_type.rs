use indexmap::IndexMap;

use super::TypeAnnotation;

/// An input object type definition.
#[derive(Clone, Debug)]
pub struct InputObjectType {
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, InputField>,
}

#[derive(Clone, Debug)]
pub struct InputField {
    pub name: String,
    pub annotation: TypeAnnotation,
    pub description: Option<String>,
}
