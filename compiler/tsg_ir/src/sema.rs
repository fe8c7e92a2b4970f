//! Semantic symbols produced by the host's binder.

use smallvec::SmallVec;

use crate::ast::TypeKind;
use crate::{Location, TypeId, TypeParamId};

/// A resolved type as it appears in a type-argument position.
///
/// Equality is symbol identity: two `Named` values are equal iff they name the
/// same definition with equal arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A concrete or constructed named type.
    Named { def: TypeId, args: Vec<TypeRef> },
    /// An open reference to a declared type parameter.
    Param(TypeParamId),
    /// The host could not resolve the type.
    Error,
}

impl TypeRef {
    #[inline]
    pub fn as_param(&self) -> Option<TypeParamId> {
        match self {
            TypeRef::Param(id) => Some(*id),
            _ => None,
        }
    }
}

/// A named type definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeSymbol {
    pub id: TypeId,
    pub kind: TypeKind,
    pub name: String,
    /// Dotted containing namespace; empty for the global namespace.
    pub namespace: String,
    pub containing_type: Option<TypeId>,
    pub type_params: Vec<TypeParamId>,
    /// One location per declaring part (several for partial types).
    pub locations: Vec<Location>,
}

impl TypeSymbol {
    /// The type as seen from inside its own declaration: the definition
    /// applied to its own parameters.
    pub fn self_type(&self) -> TypeRef {
        TypeRef::Named {
            def: self.id,
            args: self.type_params.iter().copied().map(TypeRef::Param).collect(),
        }
    }

    /// Fully qualified dotted name, e.g. `Self.Outer.Inner`.
    ///
    /// Containing types are not part of `namespace`, so the host passes a
    /// resolved prefix for nested types.
    pub fn qualified_name(&self, containing_prefix: Option<&str>) -> String {
        match (containing_prefix, self.namespace.is_empty()) {
            (Some(prefix), _) => format!("{prefix}.{}", self.name),
            (None, true) => self.name.clone(),
            (None, false) => format!("{}.{}", self.namespace, self.name),
        }
    }
}

/// A declared generic type parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParamSymbol {
    pub id: TypeParamId,
    pub owner: TypeId,
    pub ordinal: usize,
    pub name: String,
    /// Types of the attributes attached to the declaration, in source order.
    pub attributes: SmallVec<[TypeId; 2]>,
    /// Name-token location in each declaring part.
    pub locations: Vec<Location>,
}

/// A base-type reference resolved against a generic definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstructedType {
    pub def: TypeId,
    /// Formal parameters of the referenced definition.
    pub formals: Vec<TypeParamId>,
    /// Arguments supplied at this reference.
    pub args: Vec<TypeRef>,
}
