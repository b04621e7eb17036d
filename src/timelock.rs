// SPDX-License-Identifier: CC0-1.0

//! Time lock specifications
//!
//! Absolute locks are nLockTime values checked with `OP_CHECKLOCKTIMEVERIFY`;
//! relative locks are BIP68 nSequence values checked with
//! `OP_CHECKSEQUENCEVERIFY`. Relative time-based locks are counted in
//! 512-second intervals with bit 22 of the encoding selecting time-based
//! rather than height-based interpretation.

use std::{error, fmt};

use bitcoin::{absolute, Sequence};

use crate::clause::Variable;

/// Relative time locks count at most 2^16 - 1 intervals.
const MAX_INTERVALS: u64 = 0xffff;
/// BIP68 time-based locks are in units of 512 seconds.
const SECONDS_PER_INTERVAL: u64 = 512;

/// An absolute lock: the spend is valid at or after a fixed block height or
/// UNIX timestamp.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct AbsoluteTimeSpec(absolute::LockTime);

impl AbsoluteTimeSpec {
    /// Constructs an absolute lock from a consensus nLockTime value. Whether
    /// the value is a height or a timestamp follows the usual nLockTime
    /// threshold rule.
    pub fn from_consensus(n: u32) -> Self { AbsoluteTimeSpec(absolute::LockTime::from_consensus(n)) }

    /// The value pushed in front of `OP_CHECKLOCKTIMEVERIFY`.
    pub fn to_consensus_u32(self) -> u32 { self.0.to_consensus_u32() }
}

/// A relative lock: the spend is valid once the input has aged past a delay.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct RelativeTimeSpec(Sequence);

impl RelativeTimeSpec {
    /// Constructs a time-based relative lock from a span in seconds, rounding
    /// up to the next 512-second interval. Spans over `0xffff` intervals do
    /// not fit in a BIP68 sequence and are rejected.
    pub fn from_seconds(seconds: u64) -> Result<Self, TimeSpecError> {
        // Range-check before rounding so the ceiling arithmetic cannot
        // overflow on a huge span.
        if seconds > MAX_INTERVALS * SECONDS_PER_INTERVAL {
            return Err(TimeSpecError::SpanTooLong { seconds });
        }
        let intervals = (seconds + SECONDS_PER_INTERVAL - 1) / SECONDS_PER_INTERVAL;
        Ok(RelativeTimeSpec(Sequence::from_512_second_intervals(intervals as u16)))
    }

    /// A relative lock of `n` weeks.
    pub fn weeks(n: u64) -> Result<Self, TimeSpecError> {
        if n > MAX_INTERVALS * SECONDS_PER_INTERVAL / 60 / 60 / 24 / 7 {
            return Err(TimeSpecError::SpanTooLong { seconds: n.saturating_mul(7 * 24 * 60 * 60) });
        }
        Self::from_seconds(n * 7 * 24 * 60 * 60)
    }

    /// A relative lock of `n` days.
    pub fn days(n: u64) -> Result<Self, TimeSpecError> {
        if n > MAX_INTERVALS * SECONDS_PER_INTERVAL / 60 / 60 / 24 {
            return Err(TimeSpecError::SpanTooLong { seconds: n.saturating_mul(24 * 60 * 60) });
        }
        Self::from_seconds(n * 24 * 60 * 60)
    }

    /// The value pushed in front of `OP_CHECKSEQUENCEVERIFY`.
    pub fn to_consensus_u32(self) -> u32 { self.0.to_consensus_u32() }
}

/// Either kind of time lock.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TimeSpec {
    /// nLockTime-style lock, `OP_CHECKLOCKTIMEVERIFY`.
    Absolute(AbsoluteTimeSpec),
    /// nSequence-style lock, `OP_CHECKSEQUENCEVERIFY`.
    Relative(RelativeTimeSpec),
}

impl TimeSpec {
    /// The consensus value the compiled script pushes before its
    /// verification opcode.
    pub fn to_consensus_u32(self) -> u32 {
        match self {
            TimeSpec::Absolute(spec) => spec.to_consensus_u32(),
            TimeSpec::Relative(spec) => spec.to_consensus_u32(),
        }
    }
}

impl From<AbsoluteTimeSpec> for TimeSpec {
    fn from(spec: AbsoluteTimeSpec) -> Self { TimeSpec::Absolute(spec) }
}

impl From<RelativeTimeSpec> for TimeSpec {
    fn from(spec: RelativeTimeSpec) -> Self { TimeSpec::Relative(spec) }
}

impl From<TimeSpec> for Variable<TimeSpec> {
    // Time-lock clauses built straight from a spec get an anonymous
    // pre-bound variable, so callers never have to name one.
    fn from(spec: TimeSpec) -> Self { Variable::bound("", spec) }
}

impl From<AbsoluteTimeSpec> for Variable<TimeSpec> {
    fn from(spec: AbsoluteTimeSpec) -> Self { Variable::bound("", TimeSpec::Absolute(spec)) }
}

impl From<RelativeTimeSpec> for Variable<TimeSpec> {
    fn from(spec: RelativeTimeSpec) -> Self { Variable::bound("", TimeSpec::Relative(spec)) }
}

/// Error constructing a time specification.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TimeSpecError {
    /// The span exceeds the 16-bit interval range of BIP68 relative locks.
    SpanTooLong {
        /// The rejected span.
        seconds: u64,
    },
}

impl fmt::Display for TimeSpecError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TimeSpecError::SpanTooLong { seconds } => write!(
                f,
                "time span of {} seconds does not fit in a relative lock",
                seconds
            ),
        }
    }
}

impl error::Error for TimeSpecError {}

#[cfg(test)]
mod tests {
    use super::*;

    const TYPE_FLAG: u32 = 1 << 22;

    #[test]
    fn from_seconds_rounds_up() {
        // 600 seconds is one full interval plus change
        let spec = RelativeTimeSpec::from_seconds(600).unwrap();
        assert_eq!(spec.to_consensus_u32(), 2 | TYPE_FLAG);
        let exact = RelativeTimeSpec::from_seconds(1024).unwrap();
        assert_eq!(exact.to_consensus_u32(), 2 | TYPE_FLAG);
    }

    #[test]
    fn from_seconds_range() {
        assert!(RelativeTimeSpec::from_seconds(0xffff * 512).is_ok());
        assert_eq!(
            RelativeTimeSpec::from_seconds(0xffff * 512 + 1),
            Err(TimeSpecError::SpanTooLong { seconds: 0xffff * 512 + 1 }),
        );
    }

    #[test]
    fn huge_spans_rejected_without_overflow() {
        // spans near u64::MAX must fail the range check cleanly; the
        // rounding and unit arithmetic must never wrap a huge request into
        // a small (immediately satisfiable) lock
        assert!(RelativeTimeSpec::from_seconds(u64::MAX).is_err());
        assert!(RelativeTimeSpec::from_seconds(u64::MAX - 510).is_err());
        assert_eq!(
            RelativeTimeSpec::weeks(u64::MAX),
            Err(TimeSpecError::SpanTooLong { seconds: u64::MAX }),
        );
        assert_eq!(
            RelativeTimeSpec::days(u64::MAX),
            Err(TimeSpecError::SpanTooLong { seconds: u64::MAX }),
        );
    }

    #[test]
    fn unit_constructors() {
        let day = RelativeTimeSpec::days(1).unwrap();
        // ceil(86400 / 512) = 169
        assert_eq!(day.to_consensus_u32(), 169 | TYPE_FLAG);
        let week = RelativeTimeSpec::weeks(1).unwrap();
        assert_eq!(week.to_consensus_u32(), 1182 | TYPE_FLAG);

        // each unit constructor has its own pre-check
        assert!(RelativeTimeSpec::weeks(55).is_ok());
        assert!(RelativeTimeSpec::weeks(56).is_err());
        assert!(RelativeTimeSpec::days(388).is_ok());
        assert!(RelativeTimeSpec::days(389).is_err());
    }

    #[test]
    fn absolute_roundtrip() {
        let spec = AbsoluteTimeSpec::from_consensus(100);
        assert_eq!(spec.to_consensus_u32(), 100);
        assert_eq!(TimeSpec::from(spec).to_consensus_u32(), 100);
    }
}
