// SPDX-License-Identifier: CC0-1.0

//! Spending condition clauses
//!
//! Datatype describing a Boolean tree of spending conditions. Leaves are
//! verifiable requirements (a signature over a fixed key, a SHA256 preimage,
//! a transaction-template commitment, a time lock); interior nodes combine
//! them with AND and OR. Trees are built with the named constructors here and
//! handed to [`crate::compiler::compile`], which turns every disjoint
//! satisfying path into script plus a witness recipe.

pub mod variable;

use std::fmt;
use std::sync::Arc;

use bitcoin::hashes::sha256;
use bitcoin::PublicKey;

pub use self::variable::{AlreadyBound, Variable};
use crate::timelock::TimeSpec;

/// A signature requirement against a fixed public key.
///
/// Owns the derived `signature` slot the spender fills at spend time. The
/// key slot itself may also be left unbound, in which case the spender
/// supplies the key on the witness stack as well.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SignatureCheck {
    /// The key to check against.
    pub pubkey: Variable<PublicKey>,
    /// Derived slot for the signature itself. Never bound at compile time.
    pub signature: Variable<Vec<u8>>,
}

impl SignatureCheck {
    /// Builds the check and derives its signature slot from the key's name.
    pub fn new(mut pubkey: Variable<PublicKey>) -> Self {
        let signature = pubkey.sub_variable("signature");
        SignatureCheck { pubkey, signature }
    }
}

/// A requirement that the spender reveal data hashing to a fixed SHA256
/// target.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PreImageCheck {
    /// The hash the revealed data must match.
    pub hash: Variable<sha256::Hash>,
    /// Derived slot for the preimage. Never bound at compile time.
    pub preimage: Variable<Vec<u8>>,
}

impl PreImageCheck {
    /// Builds the check and derives its preimage slot from the hash's name.
    pub fn new(mut hash: Variable<sha256::Hash>) -> Self {
        let preimage = hash.sub_variable("preimage");
        PreImageCheck { hash, preimage }
    }
}

/// A commitment that the spending transaction match a fixed structural
/// digest (`OP_CHECKTEMPLATEVERIFY`).
///
/// The hash must be bound before compilation; a witness-supplied template
/// hash would let the spender commit to an arbitrary transaction.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TemplateCommitment {
    /// The expected transaction-template digest.
    pub hash: Variable<sha256::Hash>,
}

impl TemplateCommitment {
    /// Builds the check over an externally-computed template digest.
    pub fn new(hash: Variable<sha256::Hash>) -> Self { TemplateCommitment { hash } }
}

/// A node in the spending-condition tree.
///
/// Subtrees are reference counted, so normalization duplicates structure
/// without deep-copying leaves.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Clause {
    /// Trivially true.
    Satisfied,
    /// Never true. Compiling a branch containing this is an error.
    Unsatisfiable,
    /// An opaque leaf; unbound it becomes a free witness input, bound it
    /// pushes its constant.
    Variable(Variable<Vec<u8>>),
    /// Both sides must hold.
    And(Arc<Clause>, Arc<Clause>),
    /// Either side may hold; each side becomes its own spending branch.
    Or(Arc<Clause>, Arc<Clause>),
    /// Signature check.
    Signature(SignatureCheck),
    /// SHA256 preimage reveal.
    PreImage(PreImageCheck),
    /// Transaction-template commitment.
    TemplateCommit(TemplateCommitment),
    /// Absolute or relative time lock; must be bound at compile time.
    TimeLock(Variable<TimeSpec>),
}

impl Clause {
    /// Conjunction of `self` and `other`.
    pub fn and(self, other: Clause) -> Clause {
        Clause::And(Arc::new(self), Arc::new(other))
    }

    /// Disjunction of `self` and `other`.
    pub fn or(self, other: Clause) -> Clause {
        Clause::Or(Arc::new(self), Arc::new(other))
    }

    /// A signature check against `pubkey`.
    pub fn check_sig(pubkey: Variable<PublicKey>) -> Clause {
        Clause::Signature(SignatureCheck::new(pubkey))
    }

    /// A SHA256 preimage check against `hash`.
    pub fn check_preimage(hash: Variable<sha256::Hash>) -> Clause {
        Clause::PreImage(PreImageCheck::new(hash))
    }

    /// A transaction-template commitment to `hash`.
    pub fn check_template(hash: Variable<sha256::Hash>) -> Clause {
        Clause::TemplateCommit(TemplateCommitment::new(hash))
    }

    /// A time lock. Accepts a time spec directly or a pre-built variable.
    pub fn after(time: impl Into<Variable<TimeSpec>>) -> Clause {
        Clause::TimeLock(time.into())
    }

    /// An opaque variable leaf.
    pub fn var(variable: Variable<Vec<u8>>) -> Clause { Clause::Variable(variable) }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Clause::Satisfied => f.write_str("satisfied"),
            Clause::Unsatisfiable => f.write_str("unsatisfiable"),
            Clause::Variable(var) => write!(f, "var({})", var.name()),
            Clause::And(a, b) => write!(f, "({}*{})", a, b),
            Clause::Or(a, b) => write!(f, "({}+{})", a, b),
            Clause::Signature(check) => write!(f, "sig({})", check.pubkey.name()),
            Clause::PreImage(check) => write!(f, "sha256({})", check.hash.name()),
            Clause::TemplateCommit(check) => match check.hash.assigned_value() {
                Some(hash) => write!(f, "ctv({:x})", hash),
                None => write!(f, "ctv({})", check.hash.name()),
            },
            Clause::TimeLock(var) => match var.assigned_value() {
                Some(spec) => write!(f, "after({})", spec.to_consensus_u32()),
                None => write!(f, "after({})", var.name()),
            },
        }
    }
}
