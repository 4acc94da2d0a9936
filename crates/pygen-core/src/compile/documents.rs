//! Document-text helpers: `__typename` injection and fragment-spread
//! inlining for the wire documents stored on `Meta.document`.

use graphql_parser::Pos;
use indexmap::IndexSet;
use regex::Regex;

use crate::ast;
use crate::errors::GenerateError;
use crate::registry::ClassRegistry;

/// Add `__typename` to every nested selection set that lacks one. The
/// operation root is skipped; responses carry no typename there.
pub(crate) fn inject_typename(selection_set: &mut ast::query::SelectionSet, is_root: bool) {
    use graphql_parser::query::Selection;
    for selection in &mut selection_set.items {
        match selection {
            Selection::Field(field) => inject_typename(&mut field.selection_set, false),
            Selection::InlineFragment(inline) => inject_typename(&mut inline.selection_set, false),
            Selection::FragmentSpread(_) => {}
        }
    }
    if is_root || selection_set.items.is_empty() {
        return;
    }
    let has_typename = selection_set.items.iter().any(|selection| {
        matches!(selection, Selection::Field(field) if field.name == "__typename")
    });
    if !has_typename {
        selection_set.items.push(Selection::Field(typename_field()));
    }
}

fn typename_field() -> ast::query::Field {
    let position = Pos { line: 0, column: 0 };
    ast::query::Field {
        position,
        alias: None,
        name: "__typename".to_string(),
        arguments: vec![],
        directives: vec![],
        selection_set: ast::query::SelectionSet {
            span: (position, position),
            items: vec![],
        },
    }
}

/// Prepend the documents of every fragment the operation spreads,
/// directly or transitively, by rescanning the accumulated text until no
/// new spread names appear.
pub(crate) fn inline_spread_documents(
    operation_text: &str,
    registry: &ClassRegistry,
) -> Result<String, GenerateError> {
    // Spread names print as `...Name` with no space; inline fragments
    // print a space before `on` and never match.
    let spread_pattern = Regex::new(r"\.\.\.([A-Za-z_][A-Za-z0-9_]*)")
        .map_err(|error| GenerateError::Unsupported(error.to_string()))?;

    let mut result = operation_text.to_string();
    let mut included: IndexSet<String> = IndexSet::new();
    loop {
        let pending: Vec<String> = spread_pattern
            .captures_iter(&result)
            .map(|captures| captures[1].to_string())
            .filter(|name| name != "on" && !included.contains(name))
            .collect();
        if pending.is_empty() {
            return Ok(result);
        }
        for name in pending {
            if !included.insert(name.clone()) {
                continue;
            }
            let document =
                registry
                    .fragment_document(&name)
                    .ok_or_else(|| GenerateError::FragmentNotFound {
                        name: name.clone(),
                    })?;
            result = format!("{document}\n\n{result}");
        }
    }
}
