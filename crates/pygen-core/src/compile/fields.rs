//! Selection-set compilation: turning selected fields into annotated
//! class attributes, and composite-typed fields into nested classes.
//!
//! Generated classes land in an output buffer before the class that
//! references them, so the final module defines children first.

use pygen_pyast::ClassDef;
use pygen_pyast::Constant;
use pygen_pyast::Expr;
use pygen_pyast::KeywordArg;
use pygen_pyast::Stmt;

use super::inputs::field_value;
use super::inputs::frozen_model_config;
use crate::ast;
use crate::config::GeneratorConfig;
use crate::config::GraphQLKind;
use crate::errors::GenerateError;
use crate::referencer::schema_field;
use crate::registry::ClassRegistry;
use crate::schema::Schema;
use crate::types::SchemaType;
use crate::types::TypeAnnotation;

type Result<T> = std::result::Result<T, GenerateError>;

/// Compiles selection sets against one schema and config.
pub(crate) struct FieldCompiler<'a> {
    pub schema: &'a Schema,
    pub config: &'a GeneratorConfig,
}

impl<'a> FieldCompiler<'a> {
    pub fn new(schema: &'a Schema, config: &'a GeneratorConfig) -> FieldCompiler<'a> {
        FieldCompiler { schema, config }
    }

    /// Statements for one selected field: the annotated attribute plus a
    /// trailing docstring when the schema documents the field. Nested
    /// classes are appended to `classes`.
    pub fn field_statements(
        &self,
        parent_type: &str,
        parent_class: &str,
        field: &ast::query::Field,
        registry: &mut ClassRegistry,
        classes: &mut Vec<Stmt>,
    ) -> Result<Vec<Stmt>> {
        let schema_field = schema_field(self.schema, parent_type, &field.name)?;
        let annotation = schema_field.annotation.clone();
        let description = schema_field.description.clone();
        let deprecation = schema_field.deprecation.clone();

        let wire_name = field.alias.as_ref().unwrap_or(&field.name).clone();
        let target = registry.generate_node_name(&wire_name);
        let expr = self.node_annotation(&annotation, field, parent_class, registry, classes)?;
        let value = field_value(&target, &wire_name, annotation.nullable(), registry);

        let mut statements = vec![Stmt::AnnAssign {
            target,
            annotation: expr,
            value,
        }];
        if let Some(docstring) = field_docstring(description, deprecation) {
            statements.push(Stmt::docstring(docstring));
        }
        Ok(statements)
    }

    fn node_annotation(
        &self,
        annotation: &TypeAnnotation,
        field: &ast::query::Field,
        parent_class: &str,
        registry: &mut ClassRegistry,
        classes: &mut Vec<Stmt>,
    ) -> Result<Expr> {
        let expr = match annotation {
            TypeAnnotation::Named { name, .. } => {
                self.named_annotation(name, field, parent_class, registry, classes)?
            }
            TypeAnnotation::List { inner, .. } => {
                registry.register_import("typing.List");
                Expr::list_of(self.node_annotation(inner, field, parent_class, registry, classes)?)
            }
        };
        if annotation.nullable() {
            registry.register_import("typing.Optional");
            Ok(Expr::optional(expr))
        } else {
            Ok(expr)
        }
    }

    fn named_annotation(
        &self,
        type_name: &str,
        field: &ast::query::Field,
        parent_class: &str,
        registry: &mut ClassRegistry,
        classes: &mut Vec<Stmt>,
    ) -> Result<Expr> {
        let nested_class = nested_class_name(parent_class, field, registry);
        match self.schema.type_named(type_name) {
            Some(SchemaType::Scalar(_)) => Ok(registry.reference_scalar(type_name)?),
            Some(SchemaType::Enum(_)) => Ok(registry.reference_enum(type_name)?),
            Some(SchemaType::Object(_)) => self.object_selection(
                type_name,
                &field.selection_set,
                &nested_class,
                registry,
                classes,
            ),
            Some(SchemaType::Interface(_)) => self.interface_selection(
                type_name,
                &field.selection_set,
                &nested_class,
                registry,
                classes,
            ),
            Some(SchemaType::Union(_)) => self.union_selection(
                type_name,
                &field.selection_set,
                &nested_class,
                registry,
                classes,
            ),
            Some(SchemaType::InputObject(_)) => Err(GenerateError::Unsupported(format!(
                "input object `{type_name}` selected in output position",
            ))),
            None => Err(GenerateError::UnknownType {
                name: type_name.to_string(),
            }),
        }
    }

    /// Compile a selection on a concrete object type into a class (or,
    /// for a lone fragment spread, a direct reference to the fragment's
    /// class) and return the annotation expression.
    pub fn object_selection(
        &self,
        type_name: &str,
        selection_set: &ast::query::SelectionSet,
        class_name: &str,
        registry: &mut ClassRegistry,
        classes: &mut Vec<Stmt>,
    ) -> Result<Expr> {
        use graphql_parser::query::Selection;

        // A selection that is exactly one spread needs no class of its
        // own; the fragment's class already is the shape.
        if let [Selection::FragmentSpread(spread)] = selection_set.items.as_slice() {
            let class = spread_class(registry, &spread.fragment_name, type_name)?;
            return Ok(Expr::name(class));
        }
        registry.generate_object(class_name)?;

        let mut bases = Vec::new();
        for spread in spreads_of(selection_set) {
            bases.push(Expr::name(spread_class(registry, spread, type_name)?));
        }
        for base in &self.config.object_bases {
            bases.push(registry.reference_base(base));
        }
        for base in self.config.additional_bases_for(type_name) {
            bases.push(registry.reference_base(base));
        }

        let mut body = Vec::new();
        if self.config.freeze.applies_to(GraphQLKind::Object, type_name) {
            body.push(frozen_model_config(registry));
        }
        body.push(typename_field(Some(type_name), registry));
        self.push_field_statements(type_name, class_name, selection_set, registry, classes, &mut body)?;

        classes.push(Stmt::ClassDef(ClassDef::new(class_name, bases, body)));
        Ok(Expr::name(class_name))
    }

    /// Append attribute statements for the plain fields of a selection,
    /// merging inline fragments that condition on the parent type or an
    /// interface it implements.
    pub(crate) fn push_field_statements(
        &self,
        type_name: &str,
        class_name: &str,
        selection_set: &ast::query::SelectionSet,
        registry: &mut ClassRegistry,
        classes: &mut Vec<Stmt>,
        body: &mut Vec<Stmt>,
    ) -> Result<()> {
        use graphql_parser::query::Selection;
        for selection in &selection_set.items {
            match selection {
                Selection::Field(field) => {
                    if field.name == "__typename" {
                        continue;
                    }
                    body.extend(self.field_statements(
                        type_name, class_name, field, registry, classes,
                    )?);
                }
                Selection::InlineFragment(inline) => {
                    if self.condition_applies(&inline.type_condition, type_name) {
                        self.push_field_statements(
                            type_name,
                            class_name,
                            &inline.selection_set,
                            registry,
                            classes,
                            body,
                        )?;
                    } else {
                        log::warn!(
                            "skipping inline fragment that cannot apply to {type_name}",
                        );
                    }
                }
                // Spreads become base classes, not attributes.
                Selection::FragmentSpread(_) => {}
            }
        }
        Ok(())
    }

    fn condition_applies(
        &self,
        condition: &Option<ast::query::TypeCondition>,
        type_name: &str,
    ) -> bool {
        let Some(graphql_parser::query::TypeCondition::On(on_type)) = condition else {
            return true;
        };
        if on_type == type_name {
            return true;
        }
        self.schema
            .type_named(type_name)
            .and_then(SchemaType::as_object)
            .is_some_and(|object| object.interfaces.iter().any(|name| name == on_type))
    }

    /// Compile a selection on an interface into a mother class holding
    /// the shared fields plus one subclass per implementing object type,
    /// returning the union annotation over all of them.
    pub fn interface_selection(
        &self,
        interface_name: &str,
        selection_set: &ast::query::SelectionSet,
        class_name: &str,
        registry: &mut ClassRegistry,
        classes: &mut Vec<Stmt>,
    ) -> Result<Expr> {
        use graphql_parser::query::Selection;

        // A lone spread resolves to the fragment's union alias.
        if let [Selection::FragmentSpread(spread)] = selection_set.items.as_slice() {
            return match registry.fragment_class(&spread.fragment_name) {
                Some(class) => Ok(Expr::name(class.to_string())),
                None => Err(GenerateError::FragmentNotFound {
                    name: spread.fragment_name.clone(),
                }),
            };
        }

        let implementations = self.schema.implementations_of(interface_name);
        if implementations.is_empty() {
            if self.config.always_resolve_interfaces {
                return Err(GenerateError::MissingImplementations {
                    interface: interface_name.to_string(),
                });
            }
            log::warn!("interface {interface_name} has no implementations; emitting shared fields only");
            registry.generate_object(class_name)?;
            let mut body = vec![typename_field(None, registry)];
            self.push_field_statements(
                interface_name,
                class_name,
                selection_set,
                registry,
                classes,
                &mut body,
            )?;
            let bases = self.interface_bases(registry);
            classes.push(Stmt::ClassDef(ClassDef::new(class_name, bases, body)));
            return Ok(Expr::name(class_name));
        }

        // Mother class: shared fields under an unpinned typename.
        let base_name = format!("{class_name}Base");
        registry.generate_object(&base_name)?;
        let mut mother_bases = Vec::new();
        for spread in spreads_of(selection_set) {
            mother_bases.push(Expr::name(spread_mother_class(registry, spread)?));
        }
        mother_bases.extend(self.interface_bases(registry));
        let mut mother_body = vec![typename_field(None, registry)];
        self.push_shared_fields(
            interface_name,
            &base_name,
            selection_set,
            registry,
            classes,
            &mut mother_body,
        )?;
        classes.push(Stmt::ClassDef(ClassDef::new(
            base_name.clone(),
            mother_bases,
            mother_body,
        )));

        // One subclass per implementation, extended by any inline
        // fragment conditioned on it.
        let implementation_names: Vec<String> = implementations
            .iter()
            .map(|object| object.name.clone())
            .collect();
        let mut members = Vec::new();
        for object_name in &implementation_names {
            let concrete_name = format!("{class_name}{object_name}");
            registry.generate_object(&concrete_name)?;
            let mut bases = self.impl_spread_bases(selection_set, object_name, registry)?;
            bases.push(Expr::name(&base_name));

            let mut body = vec![typename_field(Some(object_name), registry)];
            for selection in &selection_set.items {
                if let Selection::InlineFragment(inline) = selection
                    && self.inline_targets(inline, object_name)
                {
                    self.push_field_statements(
                        object_name,
                        &concrete_name,
                        &inline.selection_set,
                        registry,
                        classes,
                        &mut body,
                    )?;
                }
            }
            classes.push(Stmt::ClassDef(ClassDef::new(
                concrete_name.clone(),
                bases,
                body,
            )));
            members.push(Expr::name(concrete_name));
        }

        members.push(Expr::name(base_name));
        registry.register_import("typing.Union");
        Ok(Expr::union(members))
    }

    /// Shared fields of an interface selection: plain fields only,
    /// inline fragments belong to the concrete subclasses.
    pub(crate) fn push_shared_fields(
        &self,
        interface_name: &str,
        class_name: &str,
        selection_set: &ast::query::SelectionSet,
        registry: &mut ClassRegistry,
        classes: &mut Vec<Stmt>,
        body: &mut Vec<Stmt>,
    ) -> Result<()> {
        use graphql_parser::query::Selection;
        for selection in &selection_set.items {
            if let Selection::Field(field) = selection {
                if field.name == "__typename" {
                    continue;
                }
                body.extend(self.field_statements(
                    interface_name,
                    class_name,
                    field,
                    registry,
                    classes,
                )?);
            }
        }
        Ok(())
    }

    /// Base classes a concrete interface subclass inherits from spreads:
    /// top-level spreads resolve through implementation maps, spreads
    /// inside inline fragments targeting the type resolve directly.
    pub(crate) fn impl_spread_bases(
        &self,
        selection_set: &ast::query::SelectionSet,
        object_name: &str,
        registry: &ClassRegistry,
    ) -> Result<Vec<Expr>> {
        use graphql_parser::query::Selection;
        let mut names: Vec<&str> = spreads_of(selection_set);
        for selection in &selection_set.items {
            if let Selection::InlineFragment(inline) = selection
                && self.inline_targets(inline, object_name)
            {
                names.extend(spreads_of(&inline.selection_set));
            }
        }

        let mut bases = Vec::new();
        for spread in names {
            if let Some(implementations) = registry.interface_implementations(spread) {
                if let Some(class) = implementations.get(object_name) {
                    bases.push(Expr::name(class.clone()));
                }
                continue;
            }
            match registry.fragment_type(spread) {
                // Object fragments only apply to their own type.
                Some(condition) if condition == object_name => {
                    if let Some(class) = registry.fragment_class(spread) {
                        bases.push(Expr::name(class.to_string()));
                    }
                }
                Some(_) => {}
                None => {
                    return Err(GenerateError::FragmentNotFound {
                        name: spread.to_string(),
                    });
                }
            }
        }
        Ok(bases)
    }

    /// Whether an inline fragment's condition selects the given object
    /// type, directly or via an interface it implements.
    pub(crate) fn inline_targets(
        &self,
        inline: &ast::query::InlineFragment,
        object_name: &str,
    ) -> bool {
        match &inline.type_condition {
            Some(graphql_parser::query::TypeCondition::On(on_type)) => {
                on_type == object_name
                    || self
                        .schema
                        .type_named(object_name)
                        .and_then(SchemaType::as_object)
                        .is_some_and(|object| {
                            object.interfaces.iter().any(|name| name == on_type)
                        })
            }
            None => false,
        }
    }

    /// Compile a selection on a union into one class per member reached
    /// through an inline fragment or spread, returning the union
    /// annotation. Unions expose no direct fields.
    pub fn union_selection(
        &self,
        union_name: &str,
        selection_set: &ast::query::SelectionSet,
        class_name: &str,
        registry: &mut ClassRegistry,
        classes: &mut Vec<Stmt>,
    ) -> Result<Expr> {
        use graphql_parser::query::Selection;

        // A lone spread resolves to the fragment's union alias.
        if let [Selection::FragmentSpread(spread)] = selection_set.items.as_slice() {
            return match registry.fragment_class(&spread.fragment_name) {
                Some(class) => Ok(Expr::name(class.to_string())),
                None => Err(GenerateError::FragmentNotFound {
                    name: spread.fragment_name.clone(),
                }),
            };
        }

        let union_type = self
            .schema
            .type_named(union_name)
            .and_then(SchemaType::as_union)
            .ok_or_else(|| GenerateError::UnknownType {
                name: union_name.to_string(),
            })?;

        let mut members = Vec::new();
        for selection in &selection_set.items {
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
                    if let Some(member_map) = registry.union_members(&spread.fragment_name) {
                        for class in member_map.values() {
                            members.push(Expr::name(class.clone()));
                        }
                    } else {
                        let class = spread_class(registry, &spread.fragment_name, union_name)?;
                        members.push(Expr::name(class));
                    }
                }
                Selection::InlineFragment(inline) => {
                    let Some(graphql_parser::query::TypeCondition::On(member)) =
                        &inline.type_condition
                    else {
                        return Err(GenerateError::Unsupported(format!(
                            "inline fragments on union `{union_name}` need a type condition",
                        )));
                    };
                    if !union_type.members.iter().any(|name| name == member) {
                        return Err(GenerateError::Unsupported(format!(
                            "`{member}` is not a member of union `{union_name}`",
                        )));
                    }
                    let member = member.clone();
                    let member_class = format!("{class_name}{member}");
                    members.push(self.object_selection(
                        &member,
                        &inline.selection_set,
                        &member_class,
                        registry,
                        classes,
                    )?);
                }
            }
        }

        if members.is_empty() {
            return Err(GenerateError::Unsupported(format!(
                "selection on union `{union_name}` reaches no members; \
                 add inline fragments for the members you need",
            )));
        }
        if members.len() > 1 {
            registry.register_import("typing.Union");
        }
        Ok(Expr::union(members))
    }

    fn interface_bases(&self, registry: &mut ClassRegistry) -> Vec<Expr> {
        self.config
            .interface_bases()
            .to_vec()
            .iter()
            .map(|base| registry.reference_base(base))
            .collect()
    }
}

/// `typename` attribute: pinned to a `Literal` for concrete classes,
/// `Optional[str]` for interface mother classes.
pub(crate) fn typename_field(pinned: Option<&str>, registry: &mut ClassRegistry) -> Stmt {
    registry.register_import("pydantic.Field");
    match pinned {
        Some(type_name) => {
            registry.register_import("typing.Literal");
            Stmt::AnnAssign {
                target: "typename".to_string(),
                annotation: Expr::literal_str(type_name),
                value: Some(Expr::call(
                    Expr::name("Field"),
                    vec![],
                    vec![
                        KeywordArg::new("alias", Expr::string("__typename")),
                        KeywordArg::new("default", Expr::string(type_name)),
                    ],
                )),
            }
        }
        None => {
            registry.register_import("typing.Optional");
            Stmt::AnnAssign {
                target: "typename".to_string(),
                annotation: Expr::optional(Expr::name("str")),
                value: Some(Expr::call(
                    Expr::name("Field"),
                    vec![],
                    vec![
                        KeywordArg::new("alias", Expr::string("__typename")),
                        KeywordArg::new("default", Expr::Constant(Constant::None)),
                    ],
                )),
            }
        }
    }
}

/// Fragment names spread at the top level of a selection set.
pub(crate) fn spreads_of(selection_set: &ast::query::SelectionSet) -> Vec<&str> {
    use graphql_parser::query::Selection;
    selection_set
        .items
        .iter()
        .filter_map(|selection| match selection {
            Selection::FragmentSpread(spread) => Some(spread.fragment_name.as_str()),
            _ => None,
        })
        .collect()
}

/// The class a spread contributes when used on the given concrete type:
/// the implementation-specific class for interface fragments, the
/// fragment's own class otherwise.
pub(crate) fn spread_class(
    registry: &ClassRegistry,
    fragment_name: &str,
    type_name: &str,
) -> Result<String> {
    if let Some(implementations) = registry.interface_implementations(fragment_name) {
        return match implementations.get(type_name) {
            Some(class) => Ok(class.clone()),
            None => Err(GenerateError::MissingImplementations {
                interface: fragment_name.to_string(),
            }),
        };
    }
    match registry.fragment_class(fragment_name) {
        Some(class) => Ok(class.to_string()),
        None => Err(GenerateError::FragmentNotFound {
            name: fragment_name.to_string(),
        }),
    }
}

/// The base an interface fragment contributes to a mother class.
fn spread_mother_class(registry: &ClassRegistry, fragment_name: &str) -> Result<String> {
    let class = registry
        .fragment_class(fragment_name)
        .ok_or_else(|| GenerateError::FragmentNotFound {
            name: fragment_name.to_string(),
        })?;
    if registry.interface_implementations(fragment_name).is_some() {
        Ok(format!("{class}Base"))
    } else {
        Ok(class.to_string())
    }
}

fn nested_class_name(
    parent_class: &str,
    field: &ast::query::Field,
    registry: &ClassRegistry,
) -> String {
    let segment = field.alias.as_ref().unwrap_or(&field.name);
    format!("{parent_class}{}", registry.style_object_name(segment))
}

fn field_docstring(
    description: Option<String>,
    deprecation: Option<Option<String>>,
) -> Option<String> {
    let deprecation_note = deprecation.map(|reason| {
        format!(
            "DEPRECATED: {}",
            reason.unwrap_or_else(|| "No longer supported".to_string()),
        )
    });
    match (description, deprecation_note) {
        (Some(description), Some(note)) => Some(format!("{description}\n\n{note}")),
        (Some(description), None) => Some(description),
        (None, Some(note)) => Some(note),
        (None, None) => None,
    }
}
