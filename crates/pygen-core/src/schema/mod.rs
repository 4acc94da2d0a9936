//! Loaded schema with name-indexed type lookups.

mod build_error;
mod builder;

use indexmap::IndexMap;

pub use build_error::SchemaBuildError;
pub use builder::SchemaBuilder;

use crate::types::ObjectType;
use crate::types::SchemaType;

/// A schema's type system, indexed by type name. Built once per run from
/// SDL text; immutable afterwards.
#[derive(Clone, Debug)]
pub struct Schema {
    pub(crate) types: IndexMap<String, SchemaType>,
    pub(crate) query_type: String,
    pub(crate) mutation_type: String,
    pub(crate) subscription_type: String,
}

impl Schema {
    /// Parse SDL text into a schema. Built-in scalars are pre-seeded so
    /// they resolve like any other named type.
    pub fn from_str(sdl: &str) -> Result<Schema, SchemaBuildError> {
        SchemaBuilder::build(sdl)
    }

    pub fn type_named(&self, name: &str) -> Option<&SchemaType> {
        self.types.get(name)
    }

    /// All object types implementing the given interface, in schema
    /// declaration order.
    pub fn implementations_of(&self, interface_name: &str) -> Vec<&ObjectType> {
        self.types
            .values()
            .filter_map(SchemaType::as_object)
            .filter(|object| {
                object
                    .interfaces
                    .iter()
                    .any(|name| name == interface_name)
            })
            .collect()
    }

    pub fn query_type(&self) -> Option<&ObjectType> {
        self.type_named(&self.query_type)?.as_object()
    }

    pub fn mutation_type(&self) -> Option<&ObjectType> {
        self.type_named(&self.mutation_type)?.as_object()
    }

    pub fn subscription_type(&self) -> Option<&ObjectType> {
        self.type_named(&self.subscription_type)?.as_object()
    }
}
