// SPDX-License-Identifier: CC0-1.0

//! Branch extraction
//!
//! Converts a normalized tree into an explicit list of branches, each branch
//! the ordered conjunction of literals making up one independent way of
//! satisfying the whole condition.

use crate::clause::Clause;
use crate::error::Error;

use super::normalize::Normalized;

/// One spending branch: an ordered conjunction of literal clauses.
pub type Branch = Vec<Clause>;

/// Lists the branches of a normalized tree, left to right.
///
/// Taking [`Normalized`] rather than a bare clause makes the precondition
/// explicit; an `Or` found under an `And` anyway is an internal invariant
/// violation and surfaces as [`Error::NotNormalized`].
pub fn flatten(normalized: &Normalized) -> Result<Vec<Branch>, Error> {
    flatten_clause(normalized.clause())
}

fn flatten_clause(clause: &Clause) -> Result<Vec<Branch>, Error> {
    match clause {
        Clause::And(a, b) => {
            if matches!(&**a, Clause::Or(..)) || matches!(&**b, Clause::Or(..)) {
                return Err(Error::NotNormalized(clause.to_string()));
            }
            let mut branch = single_branch(flatten_clause(a)?, clause)?;
            branch.extend(single_branch(flatten_clause(b)?, clause)?);
            Ok(vec![branch])
        }
        Clause::Or(a, b) => {
            let mut branches = flatten_clause(a)?;
            branches.extend(flatten_clause(b)?);
            Ok(branches)
        }
        literal => Ok(vec![vec![literal.clone()]]),
    }
}

// An Or-free subtree flattens to exactly one conjunction.
fn single_branch(mut branches: Vec<Branch>, node: &Clause) -> Result<Branch, Error> {
    if branches.len() != 1 {
        return Err(Error::NotNormalized(node.to_string()));
    }
    Ok(branches.swap_remove(0))
}
