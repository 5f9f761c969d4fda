//! Structural covariance matching for callable signatures.
//!
//! Given two abstractly-described signatures - a prototype (the required
//! contract) and a candidate (the callable being validated) - this crate
//! decides whether the candidate may be substituted wherever the prototype
//! is required, following standard variance rules:
//!
//! - **Return types are covariant**: the candidate may narrow what it
//!   returns, never widen it.
//! - **Parameter types are contravariant**: the candidate may widen what it
//!   accepts, never narrow it.
//!
//! The type grammar covers a fixed set of built-in pseudo-types (including
//! the top type `mixed` and the `void` return sentinel), opaque class
//! identifiers, unions, and intersections in disjunctive normal form.
//! Nullability is structural: a nullable `T` is the union `T | null`, and
//! the extraction boundary is expected to have applied [`Type::nullable`]
//! before a signature reaches the matcher.
//!
//! Class hierarchy knowledge is injected through the [`TypeResolver`] trait;
//! [`ClassGraph`] is a ready-made in-memory implementation and
//! [`NoopResolver`] disables hierarchy-dependent rules entirely.
//!
//! ```
//! use callsig::{NoopResolver, ParameterInfo, ReturnInfo, Signature, Type};
//!
//! let prototype = Signature::new(
//!     ReturnInfo::new(Some(Type::named("void")), false),
//!     vec![ParameterInfo::required("value", Some(Type::named("int")))],
//! )?;
//! let candidate = Signature::new(
//!     ReturnInfo::new(Some(Type::named("void")), false),
//!     vec![ParameterInfo::required(
//!         "value",
//!         Some(Type::union(vec![Type::named("int"), Type::named("string")])),
//!     )],
//! )?;
//!
//! // The candidate accepts more than the prototype requires.
//! assert!(prototype.is_satisfied_by(&candidate, &NoopResolver));
//! assert!(!candidate.is_satisfied_by(&prototype, &NoopResolver));
//! # Ok::<(), callsig::SignatureError>(())
//! ```
//!
//! Everything here is pure and immutable after construction; shared
//! signatures may be matched from multiple threads without coordination.

mod format;
mod resolver;
mod signature;
mod subtype;
mod types;

pub use resolver::{ClassGraph, NoopResolver, TypeResolver};
pub use signature::{ParameterInfo, ReturnInfo, Signature, SignatureError};
pub use subtype::MatchTester;
pub use types::{BuiltIn, Type, TypeName};
