//! Callable signature model and the substitutability check.
//!
//! A [`Signature`] is the structured shape of a callable: a return type with
//! a by-reference flag, plus an ordered parameter list. Values are built once
//! and read-only afterwards; the required-parameter count is derived at
//! construction and never recomputed.
//!
//! [`Signature::is_satisfied_by`] answers the registration question: may the
//! given callable be used wherever this prototype is required? Return types
//! are checked covariantly, parameter types contravariantly (by swapping
//! operands into the covariance test), and extra trailing parameters on the
//! candidate are allowed only when the caller can never be forced to supply
//! them.

use thiserror::Error;
use tracing::trace;

use crate::resolver::TypeResolver;
use crate::subtype::MatchTester;
use crate::types::Type;

/// Invariant violations reported by [`Signature::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("variadic parameter `${name}` must be the last parameter")]
    VariadicNotLast { name: String },
    #[error("signature declares a second variadic parameter `${name}`")]
    MultipleVariadics { name: String },
}

/// A single declared parameter.
///
/// An absent type means the parameter accepts anything (implicit `mixed`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    pub name: String,
    pub ty: Option<Type>,
    pub by_reference: bool,
    pub is_optional: bool,
    pub is_variadic: bool,
}

impl ParameterInfo {
    pub fn new(
        name: impl Into<String>,
        ty: Option<Type>,
        by_reference: bool,
        is_optional: bool,
        is_variadic: bool,
    ) -> Self {
        Self {
            name: name.into(),
            ty,
            by_reference,
            is_optional,
            is_variadic,
        }
    }

    /// A required by-value parameter.
    pub fn required(name: impl Into<String>, ty: Option<Type>) -> Self {
        Self::new(name, ty, false, false, false)
    }

    /// An optional by-value parameter.
    pub fn optional(name: impl Into<String>, ty: Option<Type>) -> Self {
        Self::new(name, ty, false, true, false)
    }

    /// A trailing variadic parameter. Variadics are never required, so the
    /// optional flag is set the way the host reflector reports them.
    pub fn variadic(name: impl Into<String>, ty: Option<Type>) -> Self {
        Self::new(name, ty, false, true, true)
    }

    /// Contravariant parameter check: may a caller holding an argument for
    /// `self` pass it to `other` instead? Tested as covariance with the
    /// operands swapped.
    pub fn is_satisfied_by<R: TypeResolver>(
        &self,
        other: &ParameterInfo,
        tester: &MatchTester<'_, R>,
    ) -> bool {
        self.by_reference == other.by_reference
            && tester.is_covariant(other.ty.as_ref(), self.ty.as_ref())
    }
}

/// Declared return shape of a callable.
///
/// An absent type is weaker than `void`: as an accepting type it imposes no
/// constraint at all, but as a given type it means "may return nothing, of
/// unspecified type", which satisfies nothing concrete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnInfo {
    pub ty: Option<Type>,
    pub by_reference: bool,
}

impl ReturnInfo {
    pub fn new(ty: Option<Type>, by_reference: bool) -> Self {
        Self { ty, by_reference }
    }

    /// No declared return type, returning by value.
    pub fn none() -> Self {
        Self::new(None, false)
    }

    /// Covariant return check: must `other`'s produced value fit `self`'s
    /// declaration?
    pub fn is_satisfied_by<R: TypeResolver>(
        &self,
        other: &ReturnInfo,
        tester: &MatchTester<'_, R>,
    ) -> bool {
        self.by_reference == other.by_reference
            && tester.is_covariant(self.ty.as_ref(), other.ty.as_ref())
    }
}

/// Immutable shape of a callable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    return_info: ReturnInfo,
    parameters: Vec<ParameterInfo>,
    required_parameter_count: usize,
}

impl Signature {
    /// Builds a signature, validating the parameter-list invariants: at most
    /// one variadic parameter, and if present it must be last.
    pub fn new(
        return_info: ReturnInfo,
        parameters: Vec<ParameterInfo>,
    ) -> Result<Signature, SignatureError> {
        let mut variadic: Option<&ParameterInfo> = None;
        for parameter in &parameters {
            if let Some(seen) = variadic {
                // Something follows the variadic parameter.
                return Err(if parameter.is_variadic {
                    SignatureError::MultipleVariadics {
                        name: parameter.name.clone(),
                    }
                } else {
                    SignatureError::VariadicNotLast {
                        name: seen.name.clone(),
                    }
                });
            }
            if parameter.is_variadic {
                variadic = Some(parameter);
            }
        }

        let required_parameter_count = parameters
            .iter()
            .filter(|p| !p.is_optional && !p.is_variadic)
            .count();

        Ok(Signature {
            return_info,
            parameters,
            required_parameter_count,
        })
    }

    pub fn return_info(&self) -> &ReturnInfo {
        &self.return_info
    }

    pub fn parameters(&self) -> &[ParameterInfo] {
        &self.parameters
    }

    /// Count of parameters that are neither optional nor variadic.
    pub fn required_parameter_count(&self) -> usize {
        self.required_parameter_count
    }

    /// True if `given` may be substituted wherever `self` is required.
    ///
    /// `self` is the prototype (the contract); `given` is the candidate
    /// being validated against it. Checks run in a fixed order and
    /// short-circuit on the first failure: return covariance, required-arity,
    /// then positional contravariance with the variadic tail policy.
    pub fn is_satisfied_by<R: TypeResolver>(&self, given: &Signature, resolver: &R) -> bool {
        let tester = MatchTester::new(resolver);

        if !self.return_info.is_satisfied_by(&given.return_info, &tester) {
            trace!(prototype = %self, candidate = %given, "return type not covariant");
            return false;
        }

        // A candidate that mandates more arguments than the prototype
        // promises to supply can never be invoked through it.
        if given.required_parameter_count > self.required_parameter_count {
            trace!(prototype = %self, candidate = %given, "candidate requires too many parameters");
            return false;
        }

        let mut last_matched: Option<&ParameterInfo> = None;

        for (position, parameter) in given.parameters.iter().enumerate() {
            // Parameters that exist in the prototype must be satisfied
            // directly.
            if let Some(accepting) = self.parameters.get(position) {
                if !accepting.is_satisfied_by(parameter, &tester) {
                    trace!(
                        prototype = %self,
                        candidate = %given,
                        position,
                        "parameter not contravariant"
                    );
                    return false;
                }

                last_matched = Some(accepting);
                continue;
            }

            // The candidate may accept additional parameters the prototype
            // never supplies, as long as the caller is not forced to
            // provide them.
            if !parameter.is_optional && !parameter.is_variadic {
                trace!(prototype = %self, candidate = %given, position, "extra parameter is mandatory");
                return false;
            }

            // A variadic tail on the prototype constrains every extra
            // position the candidate exposes.
            if let Some(last) = last_matched {
                if last.is_variadic && !last.is_satisfied_by(parameter, &tester) {
                    trace!(
                        prototype = %self,
                        candidate = %given,
                        position,
                        "extra parameter not accepted by variadic tail"
                    );
                    return false;
                }
            }
        }

        true
    }
}
