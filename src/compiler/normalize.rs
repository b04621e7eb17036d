// SPDX-License-Identifier: CC0-1.0

//! Boolean normalization
//!
//! Rewrites a clause tree into a sum of conjunctions (disjunctive normal
//! form) by repeatedly distributing `And` over `Or` until no `And` node has
//! an `Or` descendant. Each satisfying assignment of the result corresponds
//! to exactly one top-level disjunct, which is what lets the flattener treat
//! the tree as a list of independent spending branches.

use std::sync::Arc;

use crate::clause::Clause;
use crate::error::Error;

/// Ceiling on rewrite passes. There is no termination proof for the rewrite
/// system, only the observation that real spending conditions converge in a
/// handful of passes; hitting the ceiling is reported, never silently
/// accepted.
const MAX_PASSES: usize = 1000;

/// A clause tree in which no `And` node has an `Or` descendant.
///
/// Only [`normalize`] constructs these, so holding one is proof the
/// flattener's precondition is met.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Normalized {
    clause: Clause,
    passes: usize,
}

impl Normalized {
    /// The normalized tree.
    pub fn clause(&self) -> &Clause { &self.clause }

    /// Unwraps the normalized tree.
    pub fn into_clause(self) -> Clause { self.clause }

    /// Number of rewrite passes needed to reach the fixpoint. Useful as a
    /// diagnostic for pathological trees.
    pub fn passes(&self) -> usize { self.passes }
}

/// Distributes `And` over `Or` until a fixpoint is reached.
///
/// Passes are compared structurally; a pass that changes nothing ends the
/// iteration. Trees that still change after the pass ceiling fail with
/// [`Error::NormalizeLimitExceeded`] rather than compile incorrectly.
pub fn normalize(clause: &Clause) -> Result<Normalized, Error> {
    let mut current = clause.clone();
    for passes in 0..MAX_PASSES {
        let next = pass(&current);
        if next == current {
            return Ok(Normalized { clause: current, passes });
        }
        current = next;
    }
    Err(Error::NormalizeLimitExceeded { passes: MAX_PASSES })
}

/// One top-down rewrite pass. Leaves are identity; `Or` recurses both sides;
/// `And` applies the distribution rules below.
fn pass(clause: &Clause) -> Clause {
    match clause {
        Clause::And(a, b) => pass_and(a, b),
        Clause::Or(a, b) => Clause::Or(Arc::new(pass(a)), Arc::new(pass(b))),
        leaf => leaf.clone(),
    }
}

fn pass_and(a: &Arc<Clause>, b: &Arc<Clause>) -> Clause {
    use crate::clause::Clause::{And, Or};

    match (&**a, &**b) {
        // (a0+a1)*(b0+b1) = a0*b0 + a0*b1 + a1*b0 + a1*b1
        (Or(a0, a1), Or(b0, b1)) => or2(
            or2(and2(a0, b0), and2(a0, b1)),
            or2(and2(a1, b0), and2(a1, b1)),
        ),
        // An `And` against an `Or`: distribute the whole `And` side over the
        // `Or`'s operands.
        (Or(o0, o1), And(..)) => or2(and2(b, o0), and2(b, o1)),
        (And(..), Or(o0, o1)) => or2(and2(a, o0), and2(a, o1)),
        // A nested `And` beside a leaf: rewrite the nested side one step and
        // rebuild with it first. The outer iteration finishes the descent.
        // Conjunct order, and with it witness order, follows the rebuilt
        // tree.
        (And(..), _) => Clause::And(Arc::new(pass(a)), Arc::clone(b)),
        (Or(o0, o1), _) => or2(and2(o0, b), and2(o1, b)),
        (_, And(..)) => Clause::And(Arc::new(pass(b)), Arc::clone(a)),
        (_, Or(o0, o1)) => or2(and2(o0, a), and2(o1, a)),
        // Two literal conjuncts are already normal.
        (_, _) => Clause::And(Arc::clone(a), Arc::clone(b)),
    }
}

fn and2(a: &Arc<Clause>, b: &Arc<Clause>) -> Clause {
    Clause::And(Arc::clone(a), Arc::clone(b))
}

fn or2(a: Clause, b: Clause) -> Clause {
    Clause::Or(Arc::new(a), Arc::new(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::Variable;

    fn leaf(name: &str) -> Clause { Clause::var(Variable::new(name)) }

    /// True if no `And` node in `clause` has an `Or` descendant.
    fn is_normal(clause: &Clause) -> bool {
        fn or_free(clause: &Clause) -> bool {
            match clause {
                Clause::Or(..) => false,
                Clause::And(a, b) => or_free(a) && or_free(b),
                _ => true,
            }
        }
        match clause {
            Clause::And(a, b) => or_free(a) && or_free(b),
            Clause::Or(a, b) => is_normal(a) && is_normal(b),
            _ => true,
        }
    }

    #[test]
    fn leaves_are_fixpoints() {
        for clause in [leaf("v"), Clause::Satisfied, Clause::Unsatisfiable].iter() {
            let normalized = normalize(clause).unwrap();
            assert_eq!(normalized.clause(), clause);
            assert_eq!(normalized.passes(), 0);
        }
    }

    #[test]
    fn distributes_leaf_over_or() {
        // a*(b+c) = b*a + c*a
        let tree = leaf("a").and(leaf("b").or(leaf("c")));
        let normalized = normalize(&tree).unwrap();
        let expected = leaf("b").and(leaf("a")).or(leaf("c").and(leaf("a")));
        assert_eq!(*normalized.clause(), expected);
    }

    #[test]
    fn cross_distributes_two_ors() {
        // (a+b)*(c+d) = a*c + a*d + b*c + b*d
        let tree = (leaf("a").or(leaf("b"))).and(leaf("c").or(leaf("d")));
        let normalized = normalize(&tree).unwrap();
        let expected = (leaf("a").and(leaf("c")).or(leaf("a").and(leaf("d"))))
            .or(leaf("b").and(leaf("c")).or(leaf("b").and(leaf("d"))));
        assert_eq!(*normalized.clause(), expected);
    }

    #[test]
    fn deep_trees_become_normal() {
        let tree = (leaf("a").or(leaf("b")))
            .and(leaf("c").or(leaf("d")))
            .and(leaf("e").or(leaf("f")))
            .or(leaf("g").and(leaf("h").or(leaf("i"))));
        let normalized = normalize(&tree).unwrap();
        assert!(is_normal(normalized.clause()));
        assert!(normalized.passes() > 0);
    }

    #[test]
    fn normalization_is_idempotent() {
        let tree = (leaf("a").or(leaf("b"))).and(leaf("c").or(leaf("d")));
        let once = normalize(&tree).unwrap();
        let twice = normalize(once.clause()).unwrap();
        assert_eq!(twice.clause(), once.clause());
        assert_eq!(twice.passes(), 0);
    }

    #[test]
    fn and_of_literals_untouched() {
        let tree = leaf("a").and(leaf("b"));
        let normalized = normalize(&tree).unwrap();
        assert_eq!(*normalized.clause(), leaf("a").and(leaf("b")));
        assert_eq!(normalized.passes(), 0);
    }
}
