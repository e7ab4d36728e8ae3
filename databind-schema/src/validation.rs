//! Schema validation utilities.
//!
//! Checks that need the whole document at once, run by the resolver before
//! anything is emitted.

use crate::diagnostics::{Diagnostic, DiagnosticKind, Location};
use crate::types::SchemaDocument;
use std::collections::HashSet;

/// Checks every class's base chain for cycles.
///
/// Each cycle is reported once, on the first class of the document that
/// belongs to it, with the full chain as its path. Classes that merely lead
/// into a cycle are not reported separately. Bases naming something other
/// than a declared class end the chain.
///
/// # Returns
/// One fatal `CyclicBaseClass` diagnostic per distinct cycle.
#[must_use]
pub fn check_base_chains(doc: &SchemaDocument) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut in_reported_cycle: HashSet<&str> = HashSet::new();

    for (index, class) in doc.classes.iter().enumerate() {
        if in_reported_cycle.contains(class.name.as_str()) {
            continue;
        }

        let mut chain: Vec<&str> = vec![class.name.as_str()];
        let mut current = class;

        while let Some(base) = doc.get_class(&current.base_class_name) {
            if let Some(start) = chain.iter().position(|name| *name == base.name) {
                // Only report when the walk started inside the loop.
                if start == 0 {
                    let mut path = chain.join(" -> ");
                    path.push_str(" -> ");
                    path.push_str(&base.name);

                    diagnostics.push(Diagnostic::error(
                        DiagnosticKind::CyclicBaseClass { path },
                        Location::Class {
                            index,
                            name: class.name.clone(),
                        },
                    ));
                    in_reported_cycle.extend(chain.iter().copied());
                }
                break;
            }
            chain.push(base.name.as_str());
            current = base;
        }
    }

    diagnostics
}
