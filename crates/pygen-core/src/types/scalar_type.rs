/// A scalar type definition, built-in or custom.
#[derive(Clone, Debug)]
pub struct ScalarType {
    pub name: String,
    pub description: Option<String>,
}
