// SPDX-License-Identifier: CC0-1.0

//! Spending Conditions
//!
//! # Introduction
//!
//! In Bitcoin, the conditions under which an output may be spent are
//! enforced by Script, a stack-based language with no loops or jumps.
//! Writing Script by hand does not scale past a handful of templates, so
//! contract-authoring systems instead let callers describe *what* must hold
//! — "a signature from Alice AND a hash preimage, OR a signature from Bob
//! after two weeks" — and compile that description down to Script.
//!
//! This crate is such a compiler backend. Callers build a Boolean tree of
//! [`Clause`]s: signature checks, SHA256 preimage checks,
//! transaction-template commitments (`OP_CHECKTEMPLATEVERIFY`), and absolute
//! or relative time locks, combined with AND and OR. [`compile`] rewrites
//! the tree into a sum of conjunctions, emits one program covering every
//! disjoint satisfying branch, and returns a [`WitnessManager`]: the program
//! plus, per branch, the ordered list of witness-stack items a spender must
//! supply to take that branch.
//!
//! The crate deliberately stops at the compiler's edge: it does not sign,
//! verify, select branches, or build transactions. Those belong to the
//! layers around it.
//!
//! # Example
//!
//! ```rust
//! use std::str::FromStr;
//!
//! use spending_conditions::bitcoin::PublicKey;
//! use spending_conditions::{Clause, RelativeTimeSpec, Variable};
//!
//! let alice = PublicKey::from_str(
//!     "020e0338c96a8870479f2396c373cc7696ba124e8635d41b0ea581112b67817261",
//! ).unwrap();
//! let bob = PublicKey::from_str(
//!     "0250863ad64a87ae8a2fe83c1af1a8403cb53f53e486d8511dad8a04887e5b2352",
//! ).unwrap();
//!
//! // Alice can spend immediately; Bob only after a two-week delay.
//! let tree = Clause::check_sig(Variable::bound("alice", alice)).or(
//!     Clause::check_sig(Variable::bound("bob", bob))
//!         .and(Clause::after(RelativeTimeSpec::weeks(2).unwrap())),
//! );
//!
//! let manager = tree.compile().unwrap();
//! assert_eq!(manager.n_branches(), 2);
//! // Each branch's recipe says exactly what the spender pushes, in order.
//! assert_eq!(manager.witness(0).unwrap().items().len(), 2);
//! ```

pub use bitcoin;

pub mod clause;
pub mod compiler;
pub mod error;
pub mod timelock;
mod util;
pub mod witness;

pub use crate::clause::{Clause, Variable};
pub use crate::compiler::{compile, normalize, Normalized};
pub use crate::error::Error;
pub use crate::timelock::{AbsoluteTimeSpec, RelativeTimeSpec, TimeSpec, TimeSpecError};
pub use crate::witness::{WitnessItem, WitnessManager, WitnessTemplate};
