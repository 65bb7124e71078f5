//! Dependency closure over a schema graph.
//!
//! Computes the full set of complex types reachable from a root element,
//! plus the basic-array wrapper types the generated code will reference.

use crate::error::SchemaError;
use crate::resolver::{resolve_element, type_dependencies};
use crate::types::{BasicType, SchemaDefinition, TypeRef};
use std::collections::BTreeSet;

/// The complete set of types one generation run must emit.
#[derive(Debug, Clone, Default)]
pub struct DependencyClosure {
    /// Complex type references to emit, each exactly once.
    pub types: BTreeSet<TypeRef>,
    /// Basic-array wrapper types actually referenced.
    pub wrappers: BTreeSet<BasicType>,
}

impl DependencyClosure {
    /// Resolves the closure for a root element by fixpoint iteration.
    ///
    /// Returns the root's canonical type reference together with the
    /// closure. Wrapper references are recorded and never expanded;
    /// already-resolved complex references are skipped, which keeps diamond
    /// dependencies finite and guarantees each type appears exactly once.
    ///
    /// # Errors
    /// Returns `SchemaError` for unknown elements or types reached during
    /// expansion.
    pub fn resolve(
        schema: &SchemaDefinition,
        element_name: &str,
    ) -> Result<(TypeRef, Self), SchemaError> {
        let (root, seed) = resolve_element(schema, element_name)?;

        let mut closure = Self::default();
        let mut queue: Vec<TypeRef> = seed.into_iter().collect();

        while let Some(type_ref) = queue.pop() {
            if let Some(basic) = type_ref.basic() {
                if type_ref.multiple {
                    closure.wrappers.insert(basic);
                }
                continue;
            }
            if closure.types.contains(&type_ref) {
                continue;
            }
            let deps = type_dependencies(schema, &type_ref.name)?;
            queue.extend(deps);
            closure.types.insert(type_ref);
        }

        Ok((root, closure))
    }
}
