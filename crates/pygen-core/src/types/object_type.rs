use indexmap::IndexMap;

use super::Field;

/// An object type definition.
#[derive(Clone, Debug)]
pub struct ObjectType {
    pub name: String,
    pub description: Option<String>,
    /// Names of the interfaces this type implements.
    pub interfaces: Vec<String>,
    pub fields: IndexMap<String, Field>,
}

impl ObjectType {
    pub fn field_named(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }
}
