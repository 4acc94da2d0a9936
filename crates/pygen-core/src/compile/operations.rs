//! Operation compilation: one class per named operation, with a nested
//! `Arguments` model for its variables and a `Meta` class carrying the
//! ready-to-send wire document.

use pygen_pyast::ClassDef;
use pygen_pyast::Expr;
use pygen_pyast::KeywordArg;
use pygen_pyast::Stmt;

use super::documents::inject_typename;
use super::documents::inline_spread_documents;
use super::fields::FieldCompiler;
use super::fields::spread_class;
use super::fields::spreads_of;
use super::inputs::field_value;
use super::inputs::frozen_model_config;
use super::variables::default_value;
use super::variables::variable_annotation;
use crate::ast;
use crate::config::GeneratorConfig;
use crate::config::GraphQLKind;
use crate::errors::GenerateError;
use crate::registry::ClassRegistry;
use crate::schema::Schema;

pub(crate) fn generate_operation(
    operation: &ast::query::OperationDefinition,
    schema: &Schema,
    config: &GeneratorConfig,
    registry: &mut ClassRegistry,
) -> Result<Vec<Stmt>, GenerateError> {
    use graphql_parser::query::OperationDefinition;

    let (name, variables, selection_set, root, class_name) = match operation {
        OperationDefinition::Query(query) => {
            let name = query.name.as_ref().ok_or(GenerateError::UnnamedOperation)?;
            (
                name,
                &query.variable_definitions,
                &query.selection_set,
                schema.query_type().ok_or_else(|| GenerateError::UnknownType {
                    name: "Query".to_string(),
                })?,
                registry.generate_query(name)?,
            )
        }
        OperationDefinition::Mutation(mutation) => {
            let name = mutation
                .name
                .as_ref()
                .ok_or(GenerateError::UnnamedOperation)?;
            (
                name,
                &mutation.variable_definitions,
                &mutation.selection_set,
                schema
                    .mutation_type()
                    .ok_or_else(|| GenerateError::UnknownType {
                        name: "Mutation".to_string(),
                    })?,
                registry.generate_mutation(name)?,
            )
        }
        OperationDefinition::Subscription(subscription) => {
            let name = subscription
                .name
                .as_ref()
                .ok_or(GenerateError::UnnamedOperation)?;
            (
                name,
                &subscription.variable_definitions,
                &subscription.selection_set,
                schema
                    .subscription_type()
                    .ok_or_else(|| GenerateError::UnknownType {
                        name: "Subscription".to_string(),
                    })?,
                registry.generate_subscription(name)?,
            )
        }
        OperationDefinition::SelectionSet(_) => {
            return Err(GenerateError::UnnamedOperation);
        }
    };
    let root_type = root.name.clone();
    log::debug!("compiling operation {name} as {class_name}");

    // Wire document: typename injected below the root, spreads inlined.
    let mut wire_operation = operation.clone();
    match &mut wire_operation {
        OperationDefinition::Query(query) => inject_typename(&mut query.selection_set, true),
        OperationDefinition::Mutation(mutation) => {
            inject_typename(&mut mutation.selection_set, true);
        }
        OperationDefinition::Subscription(subscription) => {
            inject_typename(&mut subscription.selection_set, true);
        }
        OperationDefinition::SelectionSet(_) => {}
    }
    let document = inline_spread_documents(&wire_operation.to_string(), registry)?;

    let compiler = FieldCompiler::new(schema, config);
    let mut classes = Vec::new();

    let mut bases = Vec::new();
    for spread in spreads_of(selection_set) {
        bases.push(Expr::name(spread_class(registry, spread, &root_type)?));
    }
    for base in &config.operation_bases {
        bases.push(registry.reference_base(base));
    }

    let mut body = Vec::new();
    if config.freeze.applies_to(GraphQLKind::Operation, name) {
        body.push(frozen_model_config(registry));
    }
    compiler.push_field_statements(
        &root_type,
        &class_name,
        selection_set,
        registry,
        &mut classes,
        &mut body,
    )?;
    body.push(arguments_class(variables, schema, registry)?);
    body.push(meta_class(&document, config));

    classes.push(Stmt::ClassDef(ClassDef::new(class_name, bases, body)));
    Ok(classes)
}

/// Nested `Arguments` model for the operation's variables. Emitted even
/// when empty so callers can rely on its presence.
fn arguments_class(
    variables: &[ast::query::VariableDefinition],
    schema: &Schema,
    registry: &mut ClassRegistry,
) -> Result<Stmt, GenerateError> {
    use graphql_parser::query::Type;

    let mut body = Vec::new();
    for variable in variables {
        let target = registry.generate_parameter_name(&variable.name);
        let annotation = variable_annotation(&variable.var_type, schema, registry)?;
        let nullable = !matches!(variable.var_type, Type::NonNullType(_));

        let value = match &variable.default_value {
            Some(default) => {
                let default = default_value(default)?;
                if target == variable.name {
                    Some(default)
                } else {
                    registry.register_import("pydantic.Field");
                    Some(Expr::call(
                        Expr::name("Field"),
                        vec![],
                        vec![
                            KeywordArg::new("alias", Expr::string(&variable.name)),
                            KeywordArg::new("default", default),
                        ],
                    ))
                }
            }
            None => field_value(&target, &variable.name, nullable, registry),
        };
        body.push(Stmt::AnnAssign {
            target,
            annotation,
            value,
        });
    }

    let base = registry.reference_base("pydantic.BaseModel");
    Ok(Stmt::ClassDef(ClassDef::new("Arguments", vec![base], body)))
}

/// Nested `Meta` class holding the wire document and optional domain.
fn meta_class(document: &str, config: &GeneratorConfig) -> Stmt {
    let mut body = vec![Stmt::Assign {
        target: "document".to_string(),
        value: Expr::string(document),
    }];
    if let Some(domain) = &config.domain {
        body.push(Stmt::Assign {
            target: "domain".to_string(),
            value: Expr::string(domain),
        });
    }
    Stmt::ClassDef(ClassDef::new("Meta", vec![], body))
}
