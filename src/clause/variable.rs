// SPDX-License-Identifier: CC0-1.0

//! Value slots
//!
//! A [`Variable`] is a named slot holding either a compile-time constant or
//! nothing. Unbound slots become witness inputs: the compiler records their
//! names in the branch's witness template and the spender supplies the value
//! on the witness stack at spend time.

use std::{error, fmt};

/// A named value slot, either pre-bound to a compile-time constant or left
/// open as a runtime witness input.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Variable<T> {
    name: String,
    assigned_value: Option<T>,
    sub_variable_count: u32,
}

impl<T> Variable<T> {
    /// Creates an unbound variable. Its value must be supplied on the
    /// witness stack at spend time.
    pub fn new(name: impl Into<String>) -> Self {
        Variable { name: name.into(), assigned_value: None, sub_variable_count: 0 }
    }

    /// Creates a variable bound to a compile-time constant.
    pub fn bound(name: impl Into<String>, value: T) -> Self {
        Variable { name: name.into(), assigned_value: Some(value), sub_variable_count: 0 }
    }

    /// The variable's name, used as the witness placeholder label.
    pub fn name(&self) -> &str { &self.name }

    /// The bound constant, if any.
    pub fn assigned_value(&self) -> Option<&T> { self.assigned_value.as_ref() }

    /// Whether a compile-time constant has been bound.
    pub fn is_bound(&self) -> bool { self.assigned_value.is_some() }

    /// Binds the variable to a constant. Once bound, a variable is immutable
    /// for the remainder of compilation, so binding twice is an error.
    pub fn assign(&mut self, value: T) -> Result<(), AlreadyBound> {
        if self.assigned_value.is_some() {
            return Err(AlreadyBound { name: self.name.clone() });
        }
        self.assigned_value = Some(value);
        Ok(())
    }

    /// Derives a child slot named `"{parent}_{counter}_{purpose}"`. The
    /// counter is per-parent and strictly increasing, so repeated derivations
    /// for the same purpose stay distinct.
    pub fn sub_variable<U>(&mut self, purpose: &str) -> Variable<U> {
        let name = format!("{}_{}_{}", self.name, self.sub_variable_count, purpose);
        self.sub_variable_count += 1;
        Variable::new(name)
    }
}

impl<T: fmt::Debug> fmt::Display for Variable<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Variable('{}', {:?})", self.name, self.assigned_value)
    }
}

/// Attempted to rebind an already-bound [`Variable`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AlreadyBound {
    name: String,
}

impl fmt::Display for AlreadyBound {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "variable '{}' is already bound to a value", self.name)
    }
}

impl error::Error for AlreadyBound {}
