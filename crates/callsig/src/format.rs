//! Canonical textual rendering of types and signatures.
//!
//! Purely derived from the models; nothing here affects matching. The output
//! follows the host source syntax: `|` and `&` joins with parentheses when
//! nested, the `?T` shorthand for two-member unions with null, and a
//! `function ( ... )` form where trailing optional parameters sit in one
//! cumulative `[, ...]` nest.

use std::fmt;

use crate::signature::{ParameterInfo, ReturnInfo, Signature};
use crate::types::{BuiltIn, Type, TypeName};

impl TypeName {
    pub fn as_str(&self) -> &str {
        match self {
            TypeName::BuiltIn(builtin) => builtin.name(),
            TypeName::Class(name) => name,
        }
    }
}

impl Type {
    /// Renders this type at the given nesting depth. Composite types are
    /// parenthesized whenever they are nested (depth > 0).
    pub fn stringify(&self, depth: usize) -> String {
        match self {
            Type::Named(name) => name.as_str().to_string(),
            Type::Union(members) => {
                // ?T shorthand for the common nullable union.
                if members.len() == 2 {
                    if let Some(other) = members
                        .iter()
                        .find(|m| !m.is_builtin(BuiltIn::Null))
                        .filter(|_| members.iter().any(|m| m.is_builtin(BuiltIn::Null)))
                    {
                        return format!("?{}", other.stringify(depth + 1));
                    }
                }
                Self::join(members, '|', depth)
            }
            Type::Intersection(members) => Self::join(members, '&', depth),
        }
    }

    fn join(members: &[Type], separator: char, depth: usize) -> String {
        let joined = members
            .iter()
            .map(|m| m.stringify(depth + 1))
            .collect::<Vec<_>>()
            .join(&separator.to_string());
        if depth == 0 {
            joined
        } else {
            format!("({joined})")
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify(0))
    }
}

impl fmt::Display for ParameterInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ty) = &self.ty {
            write!(f, "{ty} ")?;
        }
        if self.by_reference {
            f.write_str("&")?;
        }
        if self.is_variadic {
            f.write_str("...")?;
        }
        write!(f, "${}", self.name)
    }
}

impl fmt::Display for ReturnInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ty {
            Some(ty) => write!(f, "{ty}"),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("function ")?;

        if self.return_info().by_reference {
            f.write_str("& ")?;
        }

        f.write_str("( ")?;

        let parameters = self.parameters();
        let mut open_brackets = 0;

        for (position, parameter) in parameters.iter().enumerate() {
            if position + 1 == parameters.len() {
                write!(f, "{parameter} ")?;
                break;
            }

            write!(f, "{parameter}")?;

            // The first parameter of the optional tail opens the bracket
            // nest; every separator after that stays inside it.
            let next = &parameters[position + 1];
            if open_brackets == 0 && !(next.is_optional || next.is_variadic) {
                f.write_str(", ")?;
            } else {
                f.write_str(" [, ")?;
                open_brackets += 1;
            }
        }

        for _ in 0..open_brackets {
            f.write_str("]")?;
        }
        if open_brackets > 0 {
            f.write_str(" ")?;
        }

        f.write_str(")")?;

        if self.return_info().ty.is_some() {
            write!(f, " : {}", self.return_info())?;
        }

        Ok(())
    }
}
