use super::TypeAnnotation;

/// An output field on an object or interface type.
#[derive(Clone, Debug)]
pub struct Field {
    pub name: String,
    pub annotation: TypeAnnotation,
    pub description: Option<String>,
    /// `Some` when the field carries `@deprecated`; the inner value is the
    /// reason argument when given.
    pub deprecation: Option<Option<String>>,
}
