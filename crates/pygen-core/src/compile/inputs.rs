use pygen_pyast::ClassDef;
use pygen_pyast::Constant;
use pygen_pyast::Expr;
use pygen_pyast::KeywordArg;
use pygen_pyast::Stmt;

use crate::config::GeneratorConfig;
use crate::config::GraphQLKind;
use crate::errors::GenerateError;
use crate::referencer::ReferenceRegistry;
use crate::registry::ClassRegistry;
use crate::schema::Schema;
use crate::types::SchemaType;
use crate::types::TypeAnnotation;

/// Generate a pydantic model per reachable input object type, in schema
/// declaration order.
pub(crate) fn generate_inputs(
    schema: &Schema,
    references: &ReferenceRegistry,
    config: &GeneratorConfig,
    registry: &mut ClassRegistry,
) -> Result<Vec<Stmt>, GenerateError> {
    let mut statements = Vec::new();
    for schema_type in schema.types.values() {
        let SchemaType::InputObject(input) = schema_type else {
            continue;
        };
        if config.skip_underscore && input.name.starts_with('_') {
            continue;
        }
        if config.skip_unreferenced && !references.inputs.contains(&input.name) {
            log::debug!("skipping unreferenced input {}", input.name);
            continue;
        }

        let frozen = config.freeze.applies_to(GraphQLKind::Input, &input.name);
        let use_tuple = frozen && config.freeze.convert_list_to_tuple;

        let mut body = Vec::new();
        if let Some(description) = &input.description {
            body.push(Stmt::docstring(description.clone()));
        }
        if frozen {
            body.push(frozen_model_config(registry));
        }
        for field in input.fields.values() {
            let annotation =
                input_annotation(&field.annotation, schema, config, registry, use_tuple)?;
            let target = registry.generate_node_name(&field.name);
            let value = field_value(&target, &field.name, field.annotation.nullable(), registry);
            body.push(Stmt::AnnAssign {
                target,
                annotation,
                value,
            });
            if let Some(description) = &field.description {
                body.push(Stmt::docstring(description.clone()));
            }
        }

        // Claimed after the field annotations, so a self-reference above
        // resolves as a forward reference rather than a not-yet-defined
        // name.
        let class_name = registry.generate_input(&input.name)?;

        let mut bases = Vec::new();
        for base in &config.input_bases {
            bases.push(registry.reference_base(base));
        }
        for base in config.additional_bases_for(&input.name) {
            bases.push(registry.reference_base(base));
        }
        statements.push(Stmt::ClassDef(ClassDef::new(class_name, bases, body)));
    }
    Ok(statements)
}

/// `model_config = ConfigDict(frozen=True)`
pub(crate) fn frozen_model_config(registry: &mut ClassRegistry) -> Stmt {
    registry.register_import("pydantic.ConfigDict");
    Stmt::Assign {
        target: "model_config".to_string(),
        value: Expr::call(
            Expr::name("ConfigDict"),
            vec![],
            vec![KeywordArg::new("frozen", Expr::Constant(Constant::Bool(true)))],
        ),
    }
}

/// Default expression for a generated field: a `Field(alias=...)` call
/// when the attribute was renamed, `None` when merely optional.
pub(crate) fn field_value(
    target: &str,
    wire_name: &str,
    nullable: bool,
    registry: &mut ClassRegistry,
) -> Option<Expr> {
    if target != wire_name {
        registry.register_import("pydantic.Field");
        let mut keywords = vec![KeywordArg::new("alias", Expr::string(wire_name))];
        if nullable {
            keywords.push(KeywordArg::new(
                "default",
                Expr::Constant(Constant::None),
            ));
        }
        Some(Expr::call(Expr::name("Field"), vec![], keywords))
    } else if nullable {
        Some(Expr::Constant(Constant::None))
    } else {
        None
    }
}

fn input_annotation(
    annotation: &TypeAnnotation,
    schema: &Schema,
    config: &GeneratorConfig,
    registry: &mut ClassRegistry,
    use_tuple: bool,
) -> Result<Expr, GenerateError> {
    let expr = match annotation {
        TypeAnnotation::Named { name, .. } => match schema.type_named(name) {
            Some(SchemaType::Scalar(_)) => registry.reference_scalar(name)?,
            Some(SchemaType::Enum(_)) => registry.reference_enum(name)?,
            Some(SchemaType::InputObject(_)) => {
                registry.reference_input(name, config.allow_forward_references)?
            }
            Some(_) => {
                return Err(GenerateError::Unsupported(format!(
                    "`{name}` is not usable in input position",
                )));
            }
            None => {
                return Err(GenerateError::UnknownType { name: name.clone() });
            }
        },
        TypeAnnotation::List { inner, .. } => {
            let inner = input_annotation(inner, schema, config, registry, use_tuple)?;
            if use_tuple {
                registry.register_import("typing.Tuple");
                Expr::tuple_of(inner)
            } else {
                registry.register_import("typing.List");
                Expr::list_of(inner)
            }
        }
    };
    if annotation.nullable() {
        registry.register_import("typing.Optional");
        Ok(Expr::optional(expr))
    } else {
        Ok(expr)
    }
}
