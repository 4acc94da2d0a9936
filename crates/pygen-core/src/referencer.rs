//! Pre-pass that records which schema types the documents actually reach,
//! so unreferenced enums and inputs can be skipped.

use indexmap::IndexSet;

use crate::ast;
use crate::errors::GenerateError;
use crate::schema::Schema;
use crate::types::Field;
use crate::types::SchemaType;

/// Which schema types are reachable from the given documents.
#[derive(Debug, Default)]
pub struct ReferenceRegistry {
    pub enums: IndexSet<String>,
    pub inputs: IndexSet<String>,
    pub scalars: IndexSet<String>,
    pub objects: IndexSet<String>,
}

impl ReferenceRegistry {
    pub fn scan(
        schema: &Schema,
        documents: &[ast::query::Document],
    ) -> Result<ReferenceRegistry, GenerateError> {
        let mut registry = ReferenceRegistry::default();
        for document in documents {
            for definition in &document.definitions {
                registry.visit_definition(schema, definition)?;
            }
        }
        Ok(registry)
    }

    fn visit_definition(
        &mut self,
        schema: &Schema,
        definition: &ast::query::Definition,
    ) -> Result<(), GenerateError> {
        use graphql_parser::query::Definition;
        use graphql_parser::query::OperationDefinition;
        match definition {
            Definition::Fragment(fragment) => {
                let graphql_parser::query::TypeCondition::On(type_name) = &fragment.type_condition;
                self.visit_selection_set(schema, type_name, &fragment.selection_set)
            }
            Definition::Operation(operation) => {
                let (root, variables, selection_set) = match operation {
                    OperationDefinition::Query(query) => (
                        schema.query_type(),
                        &query.variable_definitions,
                        &query.selection_set,
                    ),
                    OperationDefinition::Mutation(mutation) => (
                        schema.mutation_type(),
                        &mutation.variable_definitions,
                        &mutation.selection_set,
                    ),
                    OperationDefinition::Subscription(subscription) => (
                        schema.subscription_type(),
                        &subscription.variable_definitions,
                        &subscription.selection_set,
                    ),
                    OperationDefinition::SelectionSet(_) => {
                        return Err(GenerateError::UnnamedOperation);
                    }
                };
                let root_name = root
                    .map(|object| object.name.clone())
                    .ok_or_else(|| GenerateError::UnknownType {
                        name: "the operation root type".to_string(),
                    })?;
                for variable in variables {
                    self.visit_input_type(schema, innermost_name(&variable.var_type))?;
                }
                self.visit_selection_set(schema, &root_name, selection_set)
            }
        }
    }

    /// Register an input-position type, recursing through input object
    /// fields. Marked before recursing so self-referential inputs
    /// terminate.
    fn visit_input_type(&mut self, schema: &Schema, type_name: &str) -> Result<(), GenerateError> {
        match schema.type_named(type_name) {
            Some(SchemaType::Enum(_)) => {
                self.enums.insert(type_name.to_string());
                Ok(())
            }
            Some(SchemaType::Scalar(_)) => {
                self.scalars.insert(type_name.to_string());
                Ok(())
            }
            Some(SchemaType::InputObject(input)) => {
                if !self.inputs.insert(type_name.to_string()) {
                    return Ok(());
                }
                let field_types: Vec<String> = input
                    .fields
                    .values()
                    .map(|field| field.annotation.innermost_name().to_string())
                    .collect();
                for field_type in field_types {
                    self.visit_input_type(schema, &field_type)?;
                }
                Ok(())
            }
            Some(_) => Err(GenerateError::Unsupported(format!(
                "`{type_name}` is not usable in input position",
            ))),
            None => Err(GenerateError::UnknownType {
                name: type_name.to_string(),
            }),
        }
    }

    fn visit_selection_set(
        &mut self,
        schema: &Schema,
        parent_type: &str,
        selection_set: &ast::query::SelectionSet,
    ) -> Result<(), GenerateError> {
        use graphql_parser::query::Selection;
        for selection in &selection_set.items {
            match selection {
                Selection::Field(field) => {
                    if field.name == "__typename" {
                        continue;
                    }
                    let annotation = &schema_field(schema, parent_type, &field.name)?.annotation;
                    self.visit_output_type(
                        schema,
                        annotation.innermost_name(),
                        &field.selection_set,
                    )?;
                }
                Selection::InlineFragment(inline) => {
                    let type_name = match &inline.type_condition {
                        Some(graphql_parser::query::TypeCondition::On(name)) => name,
                        None => parent_type,
                    };
                    self.visit_selection_set(schema, type_name, &inline.selection_set)?;
                }
                // The spread's fragment definition is scanned on its own.
                Selection::FragmentSpread(_) => {}
            }
        }
        Ok(())
    }

    fn visit_output_type(
        &mut self,
        schema: &Schema,
        type_name: &str,
        selection_set: &ast::query::SelectionSet,
    ) -> Result<(), GenerateError> {
        match schema.type_named(type_name) {
            Some(SchemaType::Enum(_)) => {
                self.enums.insert(type_name.to_string());
                Ok(())
            }
            Some(SchemaType::Scalar(_)) => {
                self.scalars.insert(type_name.to_string());
                Ok(())
            }
            Some(SchemaType::Object(_) | SchemaType::Interface(_) | SchemaType::Union(_)) => {
                self.objects.insert(type_name.to_string());
                self.visit_selection_set(schema, type_name, selection_set)
            }
            Some(SchemaType::InputObject(_)) => Err(GenerateError::Unsupported(format!(
                "input object `{type_name}` selected in output position",
            ))),
            None => Err(GenerateError::UnknownType {
                name: type_name.to_string(),
            }),
        }
    }
}

/// Look up a field on an object, interface, or union parent. Unions have
/// no direct fields, so a field selection there is an error.
pub(crate) fn schema_field<'a>(
    schema: &'a Schema,
    parent_type: &str,
    field_name: &str,
) -> Result<&'a Field, GenerateError> {
    let parent = schema
        .type_named(parent_type)
        .ok_or_else(|| GenerateError::UnknownType {
            name: parent_type.to_string(),
        })?;
    let field = match parent {
        SchemaType::Object(object) => object.field_named(field_name),
        SchemaType::Interface(interface) => interface.field_named(field_name),
        SchemaType::Union(union) => {
            return Err(GenerateError::UnionFieldSelection {
                union_name: union.name.clone(),
                field_name: field_name.to_string(),
            });
        }
        _ => None,
    };
    field.ok_or_else(|| GenerateError::UnknownField {
        type_name: parent_type.to_string(),
        field_name: field_name.to_string(),
    })
}

fn innermost_name(ast_type: &ast::query::Type) -> &str {
    use graphql_parser::query::Type;
    match ast_type {
        Type::NamedType(name) => name,
        Type::ListType(inner) => innermost_name(inner),
        Type::NonNullType(inner) => innermost_name(inner),
    }
}
