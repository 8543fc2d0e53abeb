//! Type substitution.
//!
//! When the compiler moves code out of a generic method into a new
//! container (a display class or a state machine), the method's type
//! parameters are replaced by fresh ones owned by the container. A
//! [`TypeMap`] records that replacement and rewrites every type that
//! mentions the old parameters.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::synthesized::SynthesizedTypeParameter;
use crate::{SymbolKey, SymbolRef, TypeRef, TypeWithAnnotations, WeakSymbolRef};

/// Substitution from type parameters to types.
#[derive(Clone, Debug, Default)]
pub struct TypeMap {
    mapping: FxHashMap<SymbolKey, TypeRef>,
}

impl TypeMap {
    /// The identity substitution.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Map each of `from` to the type at the same position in `to`.
    pub fn new(from: &[SymbolRef], to: &[TypeRef]) -> Self {
        debug_assert_eq!(from.len(), to.len(), "type map arity mismatch");
        let mapping = from
            .iter()
            .cloned()
            .map(SymbolKey)
            .zip(to.iter().cloned())
            .collect();
        TypeMap { mapping }
    }

    /// Copy `originals` into fresh type parameters owned by `owner`.
    ///
    /// Constraints are substituted through the new map, so a constraint
    /// `where U : T` on the original becomes `where U' : T'`.
    pub fn alpha_rename(
        originals: &[SymbolRef],
        owner: &WeakSymbolRef,
    ) -> (TypeMap, Vec<SymbolRef>) {
        let renamed: Vec<Arc<SynthesizedTypeParameter>> = originals
            .iter()
            .enumerate()
            .map(|(ordinal, original)| {
                SynthesizedTypeParameter::renamed_from(original, ordinal, owner.clone())
            })
            .collect();
        let new_parameters: Vec<SymbolRef> = renamed
            .iter()
            .map(|parameter| -> SymbolRef { parameter.clone() })
            .collect();
        let targets: Vec<TypeRef> = new_parameters
            .iter()
            .cloned()
            .map(TypeRef::TypeParameter)
            .collect();
        let map = TypeMap::new(originals, &targets);

        for (parameter, original) in renamed.iter().zip(originals) {
            let constraints = original
                .as_type_parameter()
                .map(|p| p.constraint_types())
                .unwrap_or_default()
                .iter()
                .map(|constraint| map.substitute(constraint))
                .collect();
            parameter.set_constraint_types(constraints);
        }
        (map, new_parameters)
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Replacement for a type parameter, if mapped.
    pub fn get(&self, parameter: &SymbolRef) -> Option<&TypeRef> {
        self.mapping.get(&SymbolKey(parameter.clone()))
    }

    pub fn substitute(&self, ty: &TypeWithAnnotations) -> TypeWithAnnotations {
        TypeWithAnnotations::new(self.substitute_type(&ty.ty), ty.annotation)
    }

    pub fn substitute_type(&self, ty: &TypeRef) -> TypeRef {
        if self.is_empty() {
            return ty.clone();
        }
        match ty {
            TypeRef::TypeParameter(parameter) => self
                .get(parameter)
                .cloned()
                .unwrap_or_else(|| ty.clone()),
            TypeRef::Named {
                definition,
                type_arguments,
            } => {
                if type_arguments.is_empty() {
                    return ty.clone();
                }
                TypeRef::Named {
                    definition: definition.clone(),
                    type_arguments: type_arguments
                        .iter()
                        .map(|argument| self.substitute(argument))
                        .collect(),
                }
            }
            TypeRef::Array { element, rank } => TypeRef::Array {
                element: Box::new(self.substitute(element)),
                rank: *rank,
            },
            TypeRef::Pointer(pointee) => TypeRef::Pointer(Box::new(self.substitute_type(pointee))),
            TypeRef::Tuple { elements, names } => TypeRef::Tuple {
                elements: elements
                    .iter()
                    .map(|element| self.substitute(element))
                    .collect(),
                names: names.clone(),
            },
            TypeRef::Dynamic | TypeRef::NativeInteger { .. } | TypeRef::Error(_) => ty.clone(),
        }
    }
}

#[cfg(test)]
mod tests;
