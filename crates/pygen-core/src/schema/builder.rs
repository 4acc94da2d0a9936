use indexmap::IndexMap;

use super::Schema;
use super::SchemaBuildError;
use crate::ast;
use crate::types::EnumType;
use crate::types::EnumValue;
use crate::types::Field;
use crate::types::InputField;
use crate::types::InputObjectType;
use crate::types::InterfaceType;
use crate::types::ObjectType;
use crate::types::ScalarType;
use crate::types::SchemaType;
use crate::types::TypeAnnotation;
use crate::types::UnionType;

const BUILTIN_SCALARS: &[&str] = &["Boolean", "Float", "ID", "Int", "String"];

/// Converts a parsed SDL document into a [`Schema`].
pub struct SchemaBuilder {
    types: IndexMap<String, SchemaType>,
    query_type: String,
    mutation_type: String,
    subscription_type: String,
}

impl SchemaBuilder {
    pub fn build(sdl: &str) -> Result<Schema, SchemaBuildError> {
        let document = ast::schema::parse(sdl)?;
        let mut builder = SchemaBuilder::new();
        for definition in &document.definitions {
            builder.visit_definition(definition)?;
        }
        Ok(Schema {
            types: builder.types,
            query_type: builder.query_type,
            mutation_type: builder.mutation_type,
            subscription_type: builder.subscription_type,
        })
    }

    fn new() -> SchemaBuilder {
        let mut types = IndexMap::new();
        for name in BUILTIN_SCALARS {
            types.insert(
                name.to_string(),
                SchemaType::Scalar(ScalarType {
                    name: name.to_string(),
                    description: None,
                }),
            );
        }
        SchemaBuilder {
            types,
            query_type: "Query".to_string(),
            mutation_type: "Mutation".to_string(),
            subscription_type: "Subscription".to_string(),
        }
    }

    fn visit_definition(
        &mut self,
        definition: &ast::schema::Definition,
    ) -> Result<(), SchemaBuildError> {
        use graphql_parser::schema::Definition;
        match definition {
            Definition::SchemaDefinition(schema_def) => {
                if let Some(name) = &schema_def.query {
                    self.query_type = name.to_string();
                }
                if let Some(name) = &schema_def.mutation {
                    self.mutation_type = name.to_string();
                }
                if let Some(name) = &schema_def.subscription {
                    self.subscription_type = name.to_string();
                }
                Ok(())
            }
            Definition::TypeDefinition(type_def) => self.visit_type_definition(type_def),
            Definition::TypeExtension(_) => Err(SchemaBuildError::TypeExtensionsUnsupported),
            Definition::DirectiveDefinition(_) => Ok(()),
        }
    }

    fn visit_type_definition(
        &mut self,
        type_def: &ast::schema::TypeDefinition,
    ) -> Result<(), SchemaBuildError> {
        use graphql_parser::schema::TypeDefinition;
        let schema_type = match type_def {
            TypeDefinition::Scalar(scalar) => SchemaType::Scalar(ScalarType {
                name: scalar.name.to_string(),
                description: scalar.description.clone(),
            }),
            TypeDefinition::Enum(enum_type) => SchemaType::Enum(EnumType {
                name: enum_type.name.to_string(),
                description: enum_type.description.clone(),
                values: enum_type
                    .values
                    .iter()
                    .map(|value| EnumValue {
                        name: value.name.to_string(),
                        description: value.description.clone(),
                        deprecation: deprecation_of(&value.directives),
                    })
                    .collect(),
            }),
            TypeDefinition::Object(object) => SchemaType::Object(ObjectType {
                name: object.name.to_string(),
                description: object.description.clone(),
                interfaces: object
                    .implements_interfaces
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
                fields: output_fields(&object.fields),
            }),
            TypeDefinition::Interface(interface) => SchemaType::Interface(InterfaceType {
                name: interface.name.to_string(),
                description: interface.description.clone(),
                fields: output_fields(&interface.fields),
            }),
            TypeDefinition::Union(union) => SchemaType::Union(UnionType {
                name: union.name.to_string(),
                description: union.description.clone(),
                members: union.types.iter().map(ToString::to_string).collect(),
            }),
            TypeDefinition::InputObject(input) => SchemaType::InputObject(InputObjectType {
                name: input.name.to_string(),
                description: input.description.clone(),
                fields: input
                    .fields
                    .iter()
                    .map(|field| {
                        (
                            field.name.to_string(),
                            InputField {
                                name: field.name.to_string(),
                                annotation: TypeAnnotation::from_ast_type(&field.value_type),
                                description: field.description.clone(),
                            },
                        )
                    })
                    .collect(),
            }),
        };

        let name = schema_type.name().to_string();
        // Custom declarations of built-in scalars are tolerated.
        let redefines_builtin = BUILTIN_SCALARS.contains(&name.as_str())
            && matches!(schema_type, SchemaType::Scalar(_));
        if self.types.contains_key(&name) && !redefines_builtin {
            return Err(SchemaBuildError::DuplicateTypeName { name });
        }
        self.types.insert(name, schema_type);
        Ok(())
    }
}

fn output_fields(fields: &[ast::schema::Field]) -> IndexMap<String, Field> {
    fields
        .iter()
        .map(|field| {
            (
                field.name.to_string(),
                Field {
                    name: field.name.to_string(),
                    annotation: TypeAnnotation::from_ast_type(&field.field_type),
                    description: field.description.clone(),
                    deprecation: deprecation_of(&field.directives),
                },
            )
        })
        .collect()
}

fn deprecation_of(
    directives: &[graphql_parser::schema::Directive<'static, String>],
) -> Option<Option<String>> {
    let directive = directives.iter().find(|d| d.name == "deprecated")?;
    let reason = directive.arguments.iter().find_map(|(name, value)| {
        if name == "reason"
            && let graphql_parser::schema::Value::String(reason) = value
        {
            Some(reason.clone())
        } else {
            None
        }
    });
    Some(reason)
}
