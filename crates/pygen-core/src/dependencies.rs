//! Fragment dependency ordering.
//!
//! Fragments must be compiled before the fragments and operations that
//! spread them, so spreads can resolve to already-generated classes.

use indexmap::IndexMap;
use indexmap::IndexSet;
use thiserror::Error;

use crate::ast;

#[derive(Debug, Error)]
pub enum DependencyError {
    #[error("Fragment `{name}` spreads `{dependency}`, which is not defined in the documents.")]
    UnknownFragment { name: String, dependency: String },

    #[error("Fragments form a spread cycle: {}", names.join(" -> "))]
    FragmentCycle { names: Vec<String> },
}

/// All fragment definitions across the documents, in an order where every
/// fragment appears after the fragments it spreads. Ties keep declaration
/// order.
pub fn sorted_fragments<'a>(
    documents: &'a [ast::query::Document],
) -> Result<Vec<&'a ast::query::FragmentDefinition>, DependencyError> {
    let mut fragments: IndexMap<&str, &ast::query::FragmentDefinition> = IndexMap::new();
    for document in documents {
        for definition in &document.definitions {
            if let graphql_parser::query::Definition::Fragment(fragment) = definition {
                fragments.insert(fragment.name.as_str(), fragment);
            }
        }
    }

    let mut dependencies: IndexMap<&str, IndexSet<&str>> = IndexMap::new();
    for (name, fragment) in &fragments {
        let mut spreads = IndexSet::new();
        collect_spreads(&fragment.selection_set, &mut spreads);
        for dependency in &spreads {
            if !fragments.contains_key(dependency) {
                return Err(DependencyError::UnknownFragment {
                    name: name.to_string(),
                    dependency: dependency.to_string(),
                });
            }
        }
        dependencies.insert(*name, spreads);
    }

    // Kahn's algorithm over the declaration-ordered map.
    let mut sorted = Vec::with_capacity(fragments.len());
    let mut emitted: IndexSet<&str> = IndexSet::new();
    while emitted.len() < fragments.len() {
        let mut progressed = false;
        for (name, fragment) in &fragments {
            if emitted.contains(name) {
                continue;
            }
            if dependencies[name].iter().all(|dep| emitted.contains(dep)) {
                emitted.insert(*name);
                sorted.push(*fragment);
                progressed = true;
            }
        }
        if !progressed {
            let names = fragments
                .keys()
                .filter(|name| !emitted.contains(*name))
                .map(ToString::to_string)
                .collect();
            return Err(DependencyError::FragmentCycle { names });
        }
    }
    Ok(sorted)
}

/// Fragment names spread anywhere inside a selection set, inline
/// fragments included.
pub fn collect_spreads<'a>(
    selection_set: &'a ast::query::SelectionSet,
    spreads: &mut IndexSet<&'a str>,
) {
    use graphql_parser::query::Selection;
    for selection in &selection_set.items {
        match selection {
            Selection::FragmentSpread(spread) => {
                spreads.insert(spread.fragment_name.as_str());
            }
            Selection::Field(field) => collect_spreads(&field.selection_set, spreads),
            Selection::InlineFragment(inline) => collect_spreads(&inline.selection_set, spreads),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DependencyError;
    use super::sorted_fragments;
    use crate::ast;

    #[test]
    fn fragments_sort_after_their_dependencies() -> Result<(), Box<dyn std::error::Error>> {
        let document = ast::query::parse(
            "fragment Outer on Query { user { ...Inner } }\n\
             fragment Inner on User { id }",
        )?;
        let documents = [document];
        let names: Vec<_> = sorted_fragments(&documents)?
            .into_iter()
            .map(|fragment| fragment.name.as_str())
            .collect();
        assert_eq!(names, vec!["Inner", "Outer"]);
        Ok(())
    }

    #[test]
    fn spread_cycles_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let document = ast::query::parse(
            "fragment A on User { ...B }\n\
             fragment B on User { ...A }",
        )?;
        let error = sorted_fragments(&[document]).unwrap_err();
        assert!(matches!(error, DependencyError::FragmentCycle { .. }));
        Ok(())
    }

    #[test]
    fn unknown_spreads_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let document = ast::query::parse("fragment A on User { ...Missing }")?;
        let error = sorted_fragments(&[document]).unwrap_err();
        assert!(matches!(error, DependencyError::UnknownFragment { .. }));
        Ok(())
    }
}
