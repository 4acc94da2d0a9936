use super::EnumType;
use super::InputObjectType;
use super::InterfaceType;
use super::ObjectType;
use super::ScalarType;
use super::UnionType;

/// Any named type defined in the schema.
#[derive(Clone, Debug)]
pub enum SchemaType {
    Scalar(ScalarType),
    Enum(EnumType),
    Object(ObjectType),
    Interface(InterfaceType),
    Union(UnionType),
    InputObject(InputObjectType),
}

impl SchemaType {
    pub fn name(&self) -> &str {
        match self {
            SchemaType::Scalar(scalar) => &scalar.name,
            SchemaType::Enum(enum_type) => &enum_type.name,
            SchemaType::Object(object) => &object.name,
            SchemaType::Interface(interface) => &interface.name,
            SchemaType::Union(union) => &union.name,
            SchemaType::InputObject(input) => &input.name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            SchemaType::Scalar(scalar) => scalar.description.as_deref(),
            SchemaType::Enum(enum_type) => enum_type.description.as_deref(),
            SchemaType::Object(object) => object.description.as_deref(),
            SchemaType::Interface(interface) => interface.description.as_deref(),
            SchemaType::Union(union) => union.description.as_deref(),
            SchemaType::InputObject(input) => input.description.as_deref(),
        }
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            SchemaType::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_union(&self) -> Option<&UnionType> {
        match self {
            SchemaType::Union(union) => Some(union),
            _ => None,
        }
    }
}
