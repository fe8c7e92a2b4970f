//! Compact index types for documents and symbols.
//!
//! Symbols are identified by dense `u32` indices handed out by the host.
//! Two symbols are the same symbol iff their ids are equal, which is the
//! identity the analyzer relies on when comparing a type argument with the
//! declaring type.

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(raw: u32) -> Self {
                $name(raw)
            }

            /// Convert a collection index into an id.
            ///
            /// Returns `None` if the index does not fit in `u32`.
            #[inline]
            pub fn from_index(index: usize) -> Option<Self> {
                u32::try_from(index).ok().map($name)
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

define_id!(
    /// A document in the compilation.
    FileId,
    "file"
);

define_id!(
    /// A named type definition (class, struct, interface, record).
    TypeId,
    "type"
);

define_id!(
    /// A declared generic type parameter.
    TypeParamId,
    "tparam"
);
