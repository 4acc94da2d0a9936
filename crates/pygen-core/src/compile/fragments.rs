//! Fragment compilation.
//!
//! Object fragments become one class. Interface fragments expand into a
//! mother class of shared fields, one subclass per implementing type, an
//! optional catch-all, and a module-level `Union` alias. Union fragments
//! become one class per member reached through an inline fragment plus
//! the alias.

use pygen_pyast::ClassDef;
use pygen_pyast::Expr;
use pygen_pyast::KeywordArg;
use pygen_pyast::Stmt;

use super::documents::inject_typename;
use super::fields::FieldCompiler;
use super::fields::spread_class;
use super::fields::spreads_of;
use super::fields::typename_field;
use super::inputs::frozen_model_config;
use crate::ast;
use crate::config::GeneratorConfig;
use crate::config::GraphQLKind;
use crate::errors::GenerateError;
use crate::registry::ClassRegistry;
use crate::schema::Schema;
use crate::types::SchemaType;

pub(crate) fn generate_fragment(
    fragment: &ast::query::FragmentDefinition,
    schema: &Schema,
    config: &GeneratorConfig,
    registry: &mut ClassRegistry,
) -> Result<Vec<Stmt>, GenerateError> {
    let graphql_parser::query::TypeCondition::On(type_name) = &fragment.type_condition;
    registry.register_fragment_type(fragment.name.clone(), type_name.clone());

    // The wire document keeps its spreads; operations inline them later.
    let mut wire_fragment = fragment.clone();
    inject_typename(&mut wire_fragment.selection_set, false);
    registry.register_fragment_document(fragment.name.clone(), wire_fragment.to_string());

    let class_name = registry.generate_fragment(&fragment.name)?;
    let compiler = FieldCompiler::new(schema, config);

    match schema.type_named(type_name) {
        Some(SchemaType::Object(_)) => {
            object_fragment(fragment, type_name, &class_name, &compiler, config, registry)
        }
        Some(SchemaType::Interface(_)) => {
            interface_fragment(fragment, type_name, &class_name, &compiler, config, registry)
        }
        Some(SchemaType::Union(union)) => {
            let members = union.members.clone();
            union_fragment(fragment, type_name, &members, &class_name, &compiler, registry)
        }
        Some(_) => Err(GenerateError::Unsupported(format!(
            "fragment `{}` conditions on non-composite type `{type_name}`",
            fragment.name,
        ))),
        None => Err(GenerateError::UnknownType {
            name: type_name.to_string(),
        }),
    }
}

fn object_fragment(
    fragment: &ast::query::FragmentDefinition,
    type_name: &str,
    class_name: &str,
    compiler: &FieldCompiler<'_>,
    config: &GeneratorConfig,
    registry: &mut ClassRegistry,
) -> Result<Vec<Stmt>, GenerateError> {
    let mut classes = Vec::new();

    let mut bases = Vec::new();
    for spread in spreads_of(&fragment.selection_set) {
        bases.push(Expr::name(spread_class(registry, spread, type_name)?));
    }
    for base in &config.fragment_bases {
        bases.push(registry.reference_base(base));
    }
    for base in config.additional_bases_for(type_name) {
        bases.push(registry.reference_base(base));
    }

    let mut body = Vec::new();
    if config.freeze.applies_to(GraphQLKind::Fragment, &fragment.name) {
        body.push(frozen_model_config(registry));
    }
    body.push(typename_field(Some(type_name), registry));
    compiler.push_field_statements(
        type_name,
        class_name,
        &fragment.selection_set,
        registry,
        &mut classes,
        &mut body,
    )?;

    classes.push(Stmt::ClassDef(ClassDef::new(class_name, bases, body)));
    Ok(classes)
}

fn interface_fragment(
    fragment: &ast::query::FragmentDefinition,
    interface_name: &str,
    class_name: &str,
    compiler: &FieldCompiler<'_>,
    config: &GeneratorConfig,
    registry: &mut ClassRegistry,
) -> Result<Vec<Stmt>, GenerateError> {
    use graphql_parser::query::Selection;

    let implementations = compiler.schema.implementations_of(interface_name);
    if implementations.is_empty() {
        if config.always_resolve_interfaces {
            return Err(GenerateError::MissingImplementations {
                interface: interface_name.to_string(),
            });
        }
        log::warn!(
            "interface {interface_name} has no implementations; \
             fragment {} keeps its shared fields only",
            fragment.name,
        );
        return object_fragment(fragment, interface_name, class_name, compiler, config, registry);
    }
    let implementation_names: Vec<String> = implementations
        .iter()
        .map(|object| object.name.clone())
        .collect();

    let mut classes = Vec::new();
    let base_name = format!("{class_name}Base");
    registry.generate_object(&base_name)?;

    let mut mother_bases = Vec::new();
    for base in config.interface_bases() {
        mother_bases.push(registry.reference_base(base));
    }
    for base in config.additional_bases_for(interface_name) {
        mother_bases.push(registry.reference_base(base));
    }
    let mut mother_body = vec![typename_field(None, registry)];
    compiler.push_shared_fields(
        interface_name,
        &base_name,
        &fragment.selection_set,
        registry,
        &mut classes,
        &mut mother_body,
    )?;
    classes.push(Stmt::ClassDef(ClassDef::new(
        base_name.clone(),
        mother_bases,
        mother_body,
    )));

    if config.create_catchall {
        classes.push(catchall_class(class_name, &base_name, registry)?);
    }

    let mut members = Vec::new();
    for object_name in &implementation_names {
        let concrete_name = format!("{class_name}{object_name}");
        registry.generate_object(&concrete_name)?;
        let mut bases =
            compiler.impl_spread_bases(&fragment.selection_set, object_name, registry)?;
        bases.push(Expr::name(&base_name));
        let mut body = vec![typename_field(Some(object_name), registry)];
        for selection in &fragment.selection_set.items {
            if let Selection::InlineFragment(inline) = selection
                && compiler.inline_targets(inline, object_name)
            {
                compiler.push_field_statements(
                    object_name,
                    &concrete_name,
                    &inline.selection_set,
                    registry,
                    &mut classes,
                    &mut body,
                )?;
            }
        }
        classes.push(Stmt::ClassDef(ClassDef::new(
            concrete_name.clone(),
            bases,
            body,
        )));
        registry.register_interface_implementation(
            &fragment.name,
            object_name.clone(),
            concrete_name.clone(),
        );
        members.push(Expr::name(concrete_name));
    }

    // The catch-all is deliberately not part of the alias; it exists for
    // callers that opt into it explicitly.
    members.push(Expr::name(&base_name));
    registry.register_import("typing.Union");
    classes.push(Stmt::Assign {
        target: class_name.to_string(),
        value: Expr::union(members),
    });
    Ok(classes)
}

/// `class XCatch(XBase)` with a required, unpinned typename, for
/// deserializing implementations the documents did not enumerate.
fn catchall_class(
    class_name: &str,
    base_name: &str,
    registry: &mut ClassRegistry,
) -> Result<Stmt, GenerateError> {
    let catch_name = format!("{class_name}Catch");
    registry.generate_object(&catch_name)?;
    registry.register_import("pydantic.Field");
    let typename = Stmt::AnnAssign {
        target: "typename".to_string(),
        annotation: Expr::name("str"),
        value: Some(Expr::call(
            Expr::name("Field"),
            vec![],
            vec![KeywordArg::new("alias", Expr::string("__typename"))],
        )),
    };
    Ok(Stmt::ClassDef(ClassDef::new(
        catch_name,
        vec![Expr::name(base_name)],
        vec![typename],
    )))
}

fn union_fragment(
    fragment: &ast::query::FragmentDefinition,
    union_name: &str,
    union_members: &[String],
    class_name: &str,
    compiler: &FieldCompiler<'_>,
    registry: &mut ClassRegistry,
) -> Result<Vec<Stmt>, GenerateError> {
    use graphql_parser::query::Selection;

    let mut classes = Vec::new();
    let mut members = Vec::new();
    for selection in &fragment.selection_set.items {
        match selection {
            Selection::Field(field) => {
                if field.name == "__typename" {
                    continue;
                }
                return Err(GenerateError::UnionFieldSelection {
                    union_name: union_name.to_string(),
                    field_name: field.name.clone(),
                });
            }
            Selection::FragmentSpread(spread) => {
                let class = spread_class(registry, &spread.fragment_name, union_name)?;
                members.push(Expr::name(class));
            }
            Selection::InlineFragment(inline) => {
                let Some(graphql_parser::query::TypeCondition::On(member)) =
                    &inline.type_condition
                else {
                    return Err(GenerateError::Unsupported(format!(
                        "inline fragments on union `{union_name}` need a type condition",
                    )));
                };
                if !union_members.iter().any(|name| name == member) {
                    return Err(GenerateError::Unsupported(format!(
                        "`{member}` is not a member of union `{union_name}`",
                    )));
                }
                let member = member.clone();
                let member_class = format!("{class_name}{member}");
                let member_expr = compiler.object_selection(
                    &member,
                    &inline.selection_set,
                    &member_class,
                    registry,
                    &mut classes,
                )?;
                if let Some(name) = member_expr.as_name() {
                    registry.register_union_member(&fragment.name, member.clone(), name.to_string());
                }
                members.push(member_expr);
            }
        }
    }

    if members.is_empty() {
        return Err(GenerateError::Unsupported(format!(
            "fragment `{}` selects no members of union `{union_name}`",
            fragment.name,
        )));
    }
    if members.len() > 1 {
        registry.register_import("typing.Union");
    }
    classes.push(Stmt::Assign {
        target: class_name.to_string(),
        value: Expr::union(members),
    });
    Ok(classes)
}
