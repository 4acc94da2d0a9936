use indexmap::IndexMap;

use super::Field;

/// An interface type definition.
#[derive(Clone, Debug)]
pub struct InterfaceType {
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, Field>,
}

impl InterfaceType {
    pub fn field_named(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }
}
