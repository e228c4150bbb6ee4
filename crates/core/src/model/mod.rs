pub mod index;
pub mod record;

pub use index::{LibraryIndex, TraitIndex};
pub use record::{BoundPredicate, GenericParam, ImplementorRecord, TraitRef, TypeKind, TypeRef};
