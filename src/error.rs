// SPDX-License-Identifier: CC0-1.0

//! Errors

use std::{error, fmt};

/// Error compiling a clause tree to script.
///
/// Compilation is all-or-nothing; no partial program or witness data is ever
/// returned alongside an error.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// A template-commitment check reached code generation with its hash
    /// still unbound. Witness-supplied template hashes are deliberately
    /// disallowed; the hash must be a compile-time constant.
    UnboundTemplateHash(String),
    /// A time-lock check reached code generation with its time spec still
    /// unbound.
    UnboundTimeLock(String),
    /// A branch contains an unsatisfiable literal, so the spending path it
    /// describes can never be taken.
    UnsatisfiableBranch,
    /// The tree flattened to zero spending branches.
    NoSpendingPaths,
    /// An `And`/`Or` node survived into a pass that accepts only normalized
    /// input. This is an internal invariant violation, not a user error; the
    /// string is the offending node.
    NotNormalized(String),
    /// Normalization hit its pass ceiling without reaching a fixpoint.
    NormalizeLimitExceeded {
        /// The number of rewrite passes performed before giving up.
        passes: usize,
    },
    /// A bound constant exceeds the script element size limit; the string is
    /// the variable's name.
    OversizePush(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::UnboundTemplateHash(ref name) => write!(
                f,
                "template-commitment hash '{}' must be bound at compile time",
                name
            ),
            Error::UnboundTimeLock(ref name) => {
                write!(f, "time-lock value '{}' must be bound at compile time", name)
            }
            Error::UnsatisfiableBranch => {
                f.write_str("branch contains an unsatisfiable literal")
            }
            Error::NoSpendingPaths => f.write_str("clause tree has no spending paths"),
            Error::NotNormalized(ref node) => {
                write!(f, "internal: non-normalized node reached codegen: {}", node)
            }
            Error::NormalizeLimitExceeded { passes } => write!(
                f,
                "normalization did not converge within {} passes",
                passes
            ),
            Error::OversizePush(ref name) => {
                write!(f, "constant bound to '{}' is too large to push", name)
            }
        }
    }
}

impl error::Error for Error {}
