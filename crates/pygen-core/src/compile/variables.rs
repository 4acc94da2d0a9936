//! Annotation and default-value handling for operation variables.

use pygen_pyast::Constant;
use pygen_pyast::Expr;

use crate::ast;
use crate::errors::GenerateError;
use crate::registry::ClassRegistry;
use crate::schema::Schema;
use crate::types::SchemaType;

/// Annotation expression for a variable's declared type. Inputs and
/// enums are always generated before operations, so lookups here never
/// fall back to forward references.
pub(crate) fn variable_annotation(
    var_type: &ast::query::Type,
    schema: &Schema,
    registry: &mut ClassRegistry,
) -> Result<Expr, GenerateError> {
    variable_annotation_impl(var_type, schema, registry, true)
}

fn variable_annotation_impl(
    var_type: &ast::query::Type,
    schema: &Schema,
    registry: &mut ClassRegistry,
    nullable: bool,
) -> Result<Expr, GenerateError> {
    use graphql_parser::query::Type;
    let expr = match var_type {
        Type::NonNullType(inner) => {
            return variable_annotation_impl(inner, schema, registry, false);
        }
        Type::ListType(inner) => {
            registry.register_import("typing.List");
            Expr::list_of(variable_annotation_impl(inner, schema, registry, true)?)
        }
        Type::NamedType(name) => match schema.type_named(name) {
            Some(SchemaType::Scalar(_)) => registry.reference_scalar(name)?,
            Some(SchemaType::Enum(_)) => registry.reference_enum(name)?,
            Some(SchemaType::InputObject(_)) => {
                registry.reference_input(name, /* allow_forward = */ false)?
            }
            Some(_) => {
                return Err(GenerateError::Unsupported(format!(
                    "`{name}` is not usable as a variable type",
                )));
            }
            None => {
                return Err(GenerateError::UnknownType {
                    name: name.to_string(),
                });
            }
        },
    };
    if nullable {
        registry.register_import("typing.Optional");
        Ok(Expr::optional(expr))
    } else {
        Ok(expr)
    }
}

/// Convert a document-literal default value into a Python constant
/// expression.
pub(crate) fn default_value(value: &ast::query::Value) -> Result<Expr, GenerateError> {
    use graphql_parser::query::Value;
    Ok(match value {
        Value::Null => Expr::Constant(Constant::None),
        Value::Boolean(boolean) => Expr::Constant(Constant::Bool(*boolean)),
        Value::Int(int) => Expr::Constant(Constant::Int(int.as_i64().ok_or_else(|| {
            GenerateError::Unsupported("integer default out of range".to_string())
        })?)),
        Value::Float(float) => Expr::Constant(Constant::Float(*float)),
        Value::String(string) => Expr::string(string),
        // Enum value defaults arrive as their GraphQL name; the generated
        // enum classes are string-valued, so the name doubles as the value.
        Value::Enum(name) => Expr::string(name),
        Value::List(items) => {
            let items = items
                .iter()
                .map(default_value)
                .collect::<Result<Vec<_>, _>>()?;
            Expr::Tuple(items)
        }
        Value::Object(_) | Value::Variable(_) => {
            return Err(GenerateError::Unsupported(
                "object and variable defaults are not supported".to_string(),
            ));
        }
    })
}
