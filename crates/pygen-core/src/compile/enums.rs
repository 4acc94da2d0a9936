use pygen_pyast::ClassDef;
use pygen_pyast::Expr;
use pygen_pyast::Stmt;

use crate::config::GeneratorConfig;
use crate::errors::GenerateError;
use crate::referencer::ReferenceRegistry;
use crate::registry::ClassRegistry;
use crate::schema::Schema;
use crate::types::SchemaType;

/// Generate a `str`-valued `Enum` class per reachable enum type, in
/// schema declaration order.
pub(crate) fn generate_enums(
    schema: &Schema,
    references: &ReferenceRegistry,
    config: &GeneratorConfig,
    registry: &mut ClassRegistry,
) -> Result<Vec<Stmt>, GenerateError> {
    let mut statements = Vec::new();
    for schema_type in schema.types.values() {
        let SchemaType::Enum(enum_type) = schema_type else {
            continue;
        };
        if config.skip_underscore && enum_type.name.starts_with('_') {
            continue;
        }
        if config.skip_unreferenced && !references.enums.contains(&enum_type.name) {
            log::debug!("skipping unreferenced enum {}", enum_type.name);
            continue;
        }

        let class_name = registry.generate_enum(&enum_type.name)?;
        registry.register_import("enum.Enum");

        let mut body = Vec::new();
        if let Some(description) = &enum_type.description {
            body.push(Stmt::docstring(description.clone()));
        }
        for value in &enum_type.values {
            body.push(Stmt::Assign {
                target: value.name.clone(),
                value: Expr::string(&value.name),
            });
            if let Some(description) = &value.description {
                body.push(Stmt::docstring(description.clone()));
            }
        }

        // Mixins must precede `Enum` in an enum's base list.
        let mut bases = vec![Expr::name("str")];
        for base in config.additional_bases_for(&enum_type.name) {
            bases.push(registry.reference_base(base));
        }
        bases.push(Expr::name("Enum"));
        statements.push(Stmt::ClassDef(ClassDef::new(class_name, bases, body)));
    }
    Ok(statements)
}
