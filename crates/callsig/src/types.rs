//! Type representation for callable signatures.
//!
//! Types form a small closed grammar:
//!
//! - **Named**: a built-in pseudo-type or an opaque class/interface name
//! - **Union**: `A | B | C` - value is described by at least one member
//! - **Intersection**: `A & B` - value is described by every member
//!
//! Composite types are kept in disjunctive normal form: an intersection may
//! appear inside a union, but never the reverse. The constructors enforce
//! this, which lets the matching engine treat the remaining variant
//! combinations as exhaustive.
//!
//! Nullability is not a flag on a type. A nullable `T` is represented
//! structurally as `T | null`; [`Type::nullable`] performs that expansion.

/// The fixed set of built-in pseudo-types understood by the matcher.
///
/// `Mixed` is the top type (everything but `void` is covariant with it) and
/// is implicitly nullable. `Void` is only meaningful as a return type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltIn {
    String,
    Int,
    Float,
    Bool,
    Array,
    Void,
    Callable,
    Iterable,
    Object,
    Mixed,
    Null,
}

impl BuiltIn {
    /// All built-in cases, in declaration order.
    pub const ALL: [BuiltIn; 11] = [
        BuiltIn::String,
        BuiltIn::Int,
        BuiltIn::Float,
        BuiltIn::Bool,
        BuiltIn::Array,
        BuiltIn::Void,
        BuiltIn::Callable,
        BuiltIn::Iterable,
        BuiltIn::Object,
        BuiltIn::Mixed,
        BuiltIn::Null,
    ];

    /// The canonical source-level spelling of this built-in.
    pub fn name(self) -> &'static str {
        match self {
            BuiltIn::String => "string",
            BuiltIn::Int => "int",
            BuiltIn::Float => "float",
            BuiltIn::Bool => "bool",
            BuiltIn::Array => "array",
            BuiltIn::Void => "void",
            BuiltIn::Callable => "callable",
            BuiltIn::Iterable => "iterable",
            BuiltIn::Object => "object",
            BuiltIn::Mixed => "mixed",
            BuiltIn::Null => "null",
        }
    }

    /// Resolves a type name to a built-in case, if it is one.
    pub fn from_name(name: &str) -> Option<BuiltIn> {
        BuiltIn::ALL.iter().copied().find(|b| b.name() == name)
    }
}

/// A single type identifier: a built-in case or a class/interface name.
///
/// Class names are opaque to the matcher; relationships between them are
/// answered by the injected [`TypeResolver`](crate::TypeResolver).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeName {
    BuiltIn(BuiltIn),
    Class(String),
}

impl TypeName {
    pub fn is_builtin(&self, builtin: BuiltIn) -> bool {
        matches!(self, TypeName::BuiltIn(b) if *b == builtin)
    }
}

/// A type expression in disjunctive normal form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// A built-in pseudo-type or class/interface name.
    Named(TypeName),
    /// Non-empty list of alternatives. Members are never unions themselves;
    /// the constructor flattens. Order affects rendering only.
    Union(Vec<Type>),
    /// Non-empty list of required facets. Members are always named types.
    Intersection(Vec<Type>),
}

impl Type {
    /// Creates a named type, collapsing identifiers that spell a built-in
    /// into the corresponding [`BuiltIn`] case.
    pub fn named(name: impl Into<String>) -> Type {
        let name = name.into();
        match BuiltIn::from_name(&name) {
            Some(builtin) => Type::Named(TypeName::BuiltIn(builtin)),
            None => Type::Named(TypeName::Class(name)),
        }
    }

    /// Creates a named type from a built-in case directly.
    pub fn builtin(builtin: BuiltIn) -> Type {
        Type::Named(TypeName::BuiltIn(builtin))
    }

    /// Creates a union from `members`, flattening any members that are
    /// themselves unions (unions do not nest).
    ///
    /// # Panics
    ///
    /// Panics if `members` is empty.
    pub fn union(members: Vec<Type>) -> Type {
        assert!(!members.is_empty(), "union must have at least one member");
        let mut flat = Vec::with_capacity(members.len());
        for member in members {
            match member {
                Type::Union(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        Type::Union(flat)
    }

    /// Creates an intersection from `members`.
    ///
    /// # Panics
    ///
    /// Panics if `members` is empty or contains a union. DNF allows an
    /// intersection inside a union but never a union inside an intersection;
    /// a caller handing one over has broken an invariant upstream.
    pub fn intersection(members: Vec<Type>) -> Type {
        assert!(
            !members.is_empty(),
            "intersection must have at least one member"
        );
        assert!(
            !members.iter().any(|m| matches!(m, Type::Union(_))),
            "union nested inside intersection violates DNF"
        );
        Type::Intersection(members)
    }

    /// Expands an implicitly-nullable type into an explicit `T | null` union.
    ///
    /// This is the normalization step the extraction boundary applies before
    /// a signature reaches the matcher. `mixed` already includes null and is
    /// returned unchanged, as is any union that already carries a null
    /// member.
    pub fn nullable(inner: Type) -> Type {
        if inner.is_builtin(BuiltIn::Mixed) || inner.is_builtin(BuiltIn::Null) {
            return inner;
        }
        if let Type::Union(members) = &inner {
            if members.iter().any(|m| m.is_builtin(BuiltIn::Null)) {
                return inner;
            }
        }
        Type::union(vec![inner, Type::builtin(BuiltIn::Null)])
    }

    /// True if this is exactly the given built-in named type.
    pub fn is_builtin(&self, builtin: BuiltIn) -> bool {
        matches!(self, Type::Named(name) if name.is_builtin(builtin))
    }
}
