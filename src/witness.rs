// SPDX-License-Identifier: CC0-1.0

//! Witness templates
//!
//! A compiled program alone does not tell a spender what to put on the
//! witness stack. For every spending branch the compiler therefore produces
//! a [`WitnessTemplate`]: the ordered list of stack items the branch needs,
//! each either a literal constant (branch selectors, pre-bound values) or a
//! named placeholder filled at spend time (signatures, preimages). The
//! [`WitnessManager`] bundles the program with all of its templates and is
//! what a `compile` call hands back to the transaction-assembly layer.

use std::collections::BTreeMap;

use bitcoin::hashes::sha256;
use bitcoin::ScriptBuf;

use crate::util::scriptint_vec;

/// One entry of a witness recipe.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WitnessItem {
    /// Literal bytes the spender copies onto the witness stack verbatim.
    Constant(Vec<u8>),
    /// A named slot the spender fills at spend time, e.g. a signature or a
    /// hash preimage. The name is the originating [`crate::Variable`]'s.
    Placeholder(String),
}

impl WitnessItem {
    /// A constant carrying `n` in minimal CScriptNum form; used for branch
    /// selectors and indices.
    pub fn constant_int(n: i64) -> Self { WitnessItem::Constant(scriptint_vec(n)) }
}

/// The ordered witness-stack recipe for one spending branch.
///
/// Items are kept in spend-time push order. Conjuncts compile left to right
/// but the stack machine consumes its inputs top first, so each new
/// requirement is inserted at the front: the last-registered item is the
/// first one pushed.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WitnessTemplate {
    witness: Vec<WitnessItem>,
    nickname: Option<sha256::Hash>,
}

impl WitnessTemplate {
    pub(crate) fn new() -> Self { WitnessTemplate::default() }

    /// Registers a requirement, in front of everything registered so far.
    pub(crate) fn add(&mut self, item: WitnessItem) { self.witness.insert(0, item); }

    /// Records a human-meaningful identity for the branch.
    pub(crate) fn name(&mut self, nickname: sha256::Hash) { self.nickname = Some(nickname); }

    /// The stack items this branch needs, in push order.
    pub fn items(&self) -> &[WitnessItem] { &self.witness }

    /// The branch's nickname: the template digest it commits to, if any.
    pub fn nickname(&self) -> Option<sha256::Hash> { self.nickname }
}

/// A compiled program together with the witness recipe for every branch.
///
/// One `WitnessManager` is produced per compile call; branch keys run from
/// `0` to `n_branches() - 1` in the order the branches appear in the
/// normalized tree.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WitnessManager {
    program: ScriptBuf,
    witnesses: BTreeMap<usize, WitnessTemplate>,
}

impl WitnessManager {
    pub(crate) fn from_parts(program: ScriptBuf, templates: Vec<WitnessTemplate>) -> Self {
        WitnessManager {
            program,
            witnesses: templates.into_iter().enumerate().collect(),
        }
    }

    /// The compiled script covering every branch.
    pub fn program(&self) -> &ScriptBuf { &self.program }

    /// The recipe for one branch.
    pub fn witness(&self, key: usize) -> Option<&WitnessTemplate> { self.witnesses.get(&key) }

    /// All recipes, keyed by branch.
    pub fn witnesses(&self) -> impl Iterator<Item = (usize, &WitnessTemplate)> {
        self.witnesses.iter().map(|(k, v)| (*k, v))
    }

    /// Number of independently satisfiable branches.
    pub fn n_branches(&self) -> usize { self.witnesses.len() }
}
