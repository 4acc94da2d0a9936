//! In-memory representation of the schema's type system, decoupled from
//! the parser AST so lookups and polymorphism queries stay cheap.

mod enum_type;
mod field;
mod input_object_type;
mod interface_type;
mod object_type;
mod scalar_type;
mod schema_type;
mod type_annotation;
mod union_type;

pub use enum_type::EnumType;
pub use enum_type::EnumValue;
pub use field::Field;
pub use input_object_type::InputField;
pub use input_object_type::InputObjectType;
pub use interface_type::InterfaceType;
pub use object_type::ObjectType;
pub use scalar_type::ScalarType;
pub use schema_type::SchemaType;
pub use type_annotation::TypeAnnotation;
pub use union_type::UnionType;
