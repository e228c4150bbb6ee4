//! Structured implementor facts
//!
//! Records carry everything a viewer needs to render a hyperlinked impl
//! signature; markup itself is derived at the presentation boundary
//! (`crate::emit::markup`), never stored here.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A trait referenced by an index file.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct TraitRef {
    /// Short trait name ("Clone")
    pub name: String,
    /// `::`-separated module path of the defining crate ("core::clone")
    pub module_path: String,
    /// Documentation URL, carried verbatim from the input
    pub href: String,
}

impl TraitRef {
    /// Full path used as the partition key ("core::clone::Clone").
    pub fn full_path(&self) -> String {
        if self.module_path.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.module_path, self.name)
        }
    }
}

/// Categorization of an implementing type, matching the anchor classes the
/// documentation generator emits.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Struct,
    Enum,
    Trait,
    Primitive,
    Union,
    TypeAlias,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Struct => "struct",
            TypeKind::Enum => "enum",
            TypeKind::Trait => "trait",
            TypeKind::Primitive => "primitive",
            TypeKind::Union => "union",
            TypeKind::TypeAlias => "type",
        }
    }
}

/// A concrete or generic type declared to support a trait.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub name: String,
    pub kind: TypeKind,
    pub module_path: String,
    pub href: String,
}

impl TypeRef {
    pub fn full_path(&self) -> String {
        if self.module_path.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.module_path, self.name)
        }
    }
}

/// One type-level (or lifetime) parameter on an impl, bounds preserved
/// verbatim.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct GenericParam {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bounds: Vec<String>,
}

/// One `where`-clause predicate, preserved verbatim.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct BoundPredicate {
    /// The constrained target ("T", "A::Item")
    pub target: String,
    pub bounds: Vec<String>,
}

/// One (trait, implementing-type) fact extracted from a library interface
/// description. Immutable once extracted.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct ImplementorRecord {
    #[serde(rename = "trait")]
    pub trait_ref: TraitRef,
    #[serde(rename = "for")]
    pub implementor: TypeRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generics: Vec<GenericParam>,
    #[serde(default, rename = "where", skip_serializing_if = "Vec::is_empty")]
    pub predicates: Vec<BoundPredicate>,
    pub defining_library: String,
}
