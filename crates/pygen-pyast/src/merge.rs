//! Symbol-level merge of a freshly generated module against a previously
//! generated (and possibly hand-edited) one.
//!
//! The old tree supplies implementation bodies and any symbols the new
//! schema no longer produces; the new tree supplies structure: signatures,
//! field annotations, and the relative ordering of newly introduced
//! symbols. Merging a tree against itself returns an equal tree.

use crate::ClassDef;
use crate::FunctionDef;
use crate::Stmt;
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Where new-only symbols land when the old body contained no matched
/// symbol to anchor them to.
#[derive(Clone, Copy, Debug, PartialEq)]
enum UnanchoredPlacement {
    /// Top-level modules append trailing symbols.
    Append,
    /// Class bodies prepend, so new fields precede hand-written members.
    Prepend,
}

/// Merge two module bodies. `old` is the previously written file, `new` is
/// the freshly generated one.
pub fn merge_modules(old: &[Stmt], new: &[Stmt]) -> Vec<Stmt> {
    merge_bodies(old, new, UnanchoredPlacement::Append)
}

/// New signature, decorators, and return annotation; old body.
fn merge_functions(new: &FunctionDef, old: &FunctionDef) -> FunctionDef {
    FunctionDef {
        body: old.body.clone(),
        ..new.clone()
    }
}

/// New class head (bases, keywords, decorators) with a member-wise merged
/// body. Members are matched by symbol name: methods keep old bodies,
/// annotated fields take the regenerated statement, nested classes merge
/// recursively. Old members without a counterpart survive in place.
fn merge_classes(new: &ClassDef, old: &ClassDef) -> ClassDef {
    ClassDef {
        body: merge_bodies(&old.body, &new.body, UnanchoredPlacement::Prepend),
        ..new.clone()
    }
}

/// Merge a matched pair of statements according to each kind's rule.
fn merge_statement(new: &Stmt, old: &Stmt) -> Stmt {
    match (new, old) {
        (Stmt::FunctionDef(new_fn), Stmt::FunctionDef(old_fn)) => {
            Stmt::FunctionDef(merge_functions(new_fn, old_fn))
        }
        (Stmt::ClassDef(new_class), Stmt::ClassDef(old_class)) => {
            Stmt::ClassDef(merge_classes(new_class, old_class))
        }
        // Annotated/plain assignments, and any cross-kind rename of the
        // same symbol: the regenerated statement defines the structure.
        (new, _) => new.clone(),
    }
}

fn merge_bodies(old: &[Stmt], new: &[Stmt], placement: UnanchoredPlacement) -> Vec<Stmt> {
    // The desired structural skeleton, in generation order.
    let mut new_symbols: IndexMap<&str, &Stmt> = IndexMap::new();
    for stmt in new {
        if let Some(name) = stmt.symbol_name() {
            new_symbols.insert(name, stmt);
        }
    }

    // Walk the old body, merging every symbol that still exists in the new
    // tree and keeping everything else verbatim in its original position.
    let mut merged: Vec<Stmt> = Vec::with_capacity(old.len());
    let mut matched: Vec<&str> = vec![];
    let mut matched_position: IndexMap<&str, usize> = IndexMap::new();

    for stmt in old {
        match stmt.symbol_name().and_then(|name| {
            new_symbols
                .get_key_value(name)
                .map(|(key, new_stmt)| (*key, *new_stmt))
        }) {
            Some((name, new_stmt)) => {
                matched_position.insert(name, merged.len());
                merged.push(merge_statement(new_stmt, stmt));
                matched.push(name);
            }
            None => merged.push(stmt.clone()),
        }
    }

    // Thread new-only symbols back in, anchored to the nearest matched
    // symbol that follows them in the new tree's ordering; whatever is left
    // trails the last matched symbol.
    let mut missing: Vec<&str> = new_symbols
        .keys()
        .copied()
        .filter(|name| !matched.contains(name))
        .collect();

    let mut insert_before: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
    let mut insert_after: BTreeMap<usize, Vec<&str>> = BTreeMap::new();

    let mut last_matched: Option<&str> = None;
    for anchor in &matched {
        last_matched = Some(anchor);
        for name in new_symbols.keys() {
            if name == anchor {
                break;
            }
            if let Some(index) = missing.iter().position(|missing_name| missing_name == name) {
                missing.remove(index);
                insert_before
                    .entry(matched_position[anchor])
                    .or_default()
                    .push(name);
            }
        }
    }

    match last_matched {
        Some(anchor) if !missing.is_empty() => {
            insert_after.insert(matched_position[anchor], missing);
        }
        Some(_) => {}
        None => {
            // No anchors at all: placement decides which end the new
            // symbols take.
            let new_stmts = missing.iter().map(|name| new_symbols[name].clone());
            return match placement {
                UnanchoredPlacement::Append => {
                    let mut body = merged;
                    body.extend(new_stmts);
                    body
                }
                UnanchoredPlacement::Prepend => {
                    let mut body: Vec<Stmt> = new_stmts.collect();
                    body.extend(merged);
                    body
                }
            };
        }
    }

    let mut threaded: Vec<Stmt> = Vec::with_capacity(merged.len() + new_symbols.len());
    for (index, stmt) in merged.into_iter().enumerate() {
        if let Some(names) = insert_before.get(&index) {
            threaded.extend(names.iter().map(|name| new_symbols[name].clone()));
        }
        threaded.push(stmt);
        if let Some(names) = insert_after.get(&index) {
            threaded.extend(names.iter().map(|name| new_symbols[name].clone()));
        }
    }

    threaded
}
