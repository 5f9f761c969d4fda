//! Structural covariance checking over type trees.
//!
//! The single relation here is `is_covariant(accepting, given)`: does every
//! value describable by `given` also fit `accepting`? Callers obtain
//! contravariance (parameter positions) by swapping the operands.
//!
//! Composite type acceptance:
//! - given union: every member must be covariant with the accepting type
//! - given intersection against a named type: at least one member suffices
//! - accepting union: given must fit at least one member
//! - accepting intersection: given must fit every member
//!
//! A given intersection is only ever compared against a named type; its
//! members cannot be tested individually against a composite. DNF
//! construction guarantees no other combination survives to that branch.
//!
//! The walk is pure and total. Recursion depth is bounded by the type tree,
//! which is shallow in practice (DNF is at most two levels).

use crate::resolver::TypeResolver;
use crate::types::{BuiltIn, Type, TypeName};

/// Covariance engine over two type trees.
///
/// Borrows a [`TypeResolver`] for the three rule-table rows that need class
/// hierarchy knowledge. Stateless otherwise; concurrent use on shared types
/// needs no coordination.
pub struct MatchTester<'a, R: TypeResolver> {
    resolver: &'a R,
}

impl<'a, R: TypeResolver> MatchTester<'a, R> {
    pub fn new(resolver: &'a R) -> Self {
        Self { resolver }
    }

    /// True iff every value describable by `given` is describable by
    /// `accepting`.
    ///
    /// An absent `accepting` (no declared type) or an explicit `void`
    /// accepts anything, including nothing. An absent `given` satisfies
    /// nothing but those two: an unconstrained producer offers no guarantee
    /// a concrete requirement could rely on.
    pub fn is_covariant(&self, accepting: Option<&Type>, given: Option<&Type>) -> bool {
        let Some(accepting) = accepting else {
            return true;
        };
        if accepting.is_builtin(BuiltIn::Void) {
            return true;
        }

        let Some(given) = given else {
            return false;
        };

        self.composite_covariant(accepting, given)
    }

    fn composite_covariant(&self, accepting: &Type, given: &Type) -> bool {
        // A union producer must fit no matter which disjunct it actually
        // yields, regardless of the accepting shape.
        if let Type::Union(members) = given {
            return members
                .iter()
                .all(|member| self.composite_covariant(accepting, member));
        }

        match accepting {
            Type::Named(accepting_name) => match given {
                // Any one guaranteed facet of the intersection suffices.
                Type::Intersection(members) => members
                    .iter()
                    .any(|member| self.composite_covariant(accepting, member)),
                Type::Named(given_name) => self.named_covariant(accepting_name, given_name),
                Type::Union(_) => unreachable!("given union peeled off above"),
            },
            Type::Union(members) => members
                .iter()
                .any(|member| self.composite_covariant(member, given)),
            Type::Intersection(members) => members
                .iter()
                .all(|member| self.composite_covariant(member, given)),
        }
    }

    /// Pairwise rule table for two named types, first match wins.
    fn named_covariant(&self, accepting: &TypeName, given: &TypeName) -> bool {
        if accepting == given {
            return true;
        }

        match (accepting, given) {
            // mixed is the top type, except that void (the absence of a
            // value) is not covariant with it.
            (TypeName::BuiltIn(BuiltIn::Mixed), given) => {
                !given.is_builtin(BuiltIn::Void)
            }
            // int widens to float even under strict semantics.
            (TypeName::BuiltIn(BuiltIn::Float), TypeName::BuiltIn(BuiltIn::Int)) => true,
            (TypeName::BuiltIn(BuiltIn::Iterable), TypeName::BuiltIn(BuiltIn::Array)) => true,
            (TypeName::BuiltIn(BuiltIn::Iterable), TypeName::Class(class)) => {
                self.resolver.is_traversable(class)
            }
            (TypeName::BuiltIn(BuiltIn::Callable), TypeName::Class(class)) => {
                self.resolver.is_invokable(class)
            }
            // Any class or interface identifier is an object.
            (TypeName::BuiltIn(BuiltIn::Object), TypeName::Class(_)) => true,
            (TypeName::Class(sup), TypeName::Class(sub)) => {
                self.resolver.is_subclass_of(sub, sup)
            }
            _ => false,
        }
    }
}
