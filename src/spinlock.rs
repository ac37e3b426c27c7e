use std::iter::FusedIterator;
use std::time::Instant;

use tracing::{debug, info, trace};

use crate::config::SpinlockConfig;
use crate::error::Result;
use crate::node::{HEAD, Node, NodeIndex};
use crate::node_pool::NodePool;

// Emit a progress event every 2^22 insertions
const PROGRESS_MASK: u32 = (1 << 22) - 1;

/// Values reported once the simulation has finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinlockOutcome {
    /// Value stored at node 0, always 0
    pub head: u32,
    /// Value of node 0's successor
    pub after_head: u32,
}

/// A circular buffer grown by repeated step-and-insert.
///
/// Starting from `[0]`, each insertion walks `step_size` nodes forward from
/// the previous stepping origin and places the next value right after the
/// node it lands on. Nodes live in a [`NodePool`] sized for every insertion
/// up front; successor links are pool indices.
pub struct SpinlockBuffer {
    pool: NodePool,
    step_size: usize,
    cycles: u32,
    // Node right after the most recent insertion; stepping starts here
    cursor: NodeIndex,
}

impl SpinlockBuffer {
    /// Allocate the pool and create the single-node sequence `[0]`.
    pub fn new(config: SpinlockConfig) -> Result<Self> {
        let mut pool = NodePool::with_capacity(config.pool_size())?;
        let head = pool.allocate(HEAD)?;

        debug!(
            step_size = config.step_size(),
            cycles = config.cycles(),
            pool_bytes = config.pool_size() * std::mem::size_of::<Node>(),
            "Allocated spinlock buffer"
        );

        Ok(SpinlockBuffer {
            pool,
            step_size: config.step_size(),
            cycles: config.cycles(),
            cursor: head,
        })
    }

    /// Perform a single insertion.
    ///
    /// Returns the inserted value, or `None` once all `cycles` insertions
    /// have been made.
    pub fn insert_next(&mut self) -> Result<Option<u32>> {
        let len = self.pool.len();
        if len == self.pool.capacity() {
            return Ok(None);
        }

        // Walking a multiple of `len` returns to the same node, so only the
        // remainder matters. At least one step is always taken so that
        // `prev` is the predecessor of `pos`.
        let steps = (self.step_size - 1) % len + 1;

        let mut prev = self.cursor;
        let mut pos = self.cursor;
        for _ in 0..steps {
            prev = pos;
            pos = self.pool.next(pos);
        }

        let inserted = self.pool.allocate(pos)?;
        self.pool.set_next(prev, inserted);
        self.cursor = pos;

        Ok(Some(self.pool.value(inserted)))
    }

    /// Run every remaining insertion. Calling it again after completion is a
    /// no-op that returns the same outcome.
    pub fn run(&mut self) -> Result<SpinlockOutcome> {
        let started = Instant::now();

        while let Some(value) = self.insert_next()? {
            if value & PROGRESS_MASK == 0 {
                trace!(inserted = value, cycles = self.cycles, "Spinlock progress");
            }
        }

        let outcome = self.outcome();
        info!(
            step_size = self.step_size,
            cycles = self.cycles,
            after_head = outcome.after_head,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Spinlock simulation complete"
        );

        Ok(outcome)
    }

    pub fn outcome(&self) -> SpinlockOutcome {
        SpinlockOutcome {
            head: self.value_at_head(),
            after_head: self.value_after_head(),
        }
    }

    /// Value stored at node 0.
    pub fn value_at_head(&self) -> u32 {
        self.pool.value(HEAD)
    }

    /// Value of node 0's successor. For a single-node sequence this is 0.
    pub fn value_after_head(&self) -> u32 {
        self.pool.value(self.pool.next(HEAD))
    }

    /// Value following `value` in the sequence, or `None` if `value` has
    /// not been inserted yet.
    pub fn value_after(&self, value: u32) -> Option<u32> {
        // Values double as pool indices
        let node = self.pool.get(value)?;
        Some(self.pool.value(node.next()))
    }

    /// Walk the sequence once, starting at node 0.
    pub fn iter(&self) -> Sequence<'_> {
        Sequence {
            pool: &self.pool,
            current: HEAD,
            remaining: self.pool.len(),
        }
    }

    /// Current sequence length
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    /// Never true: node 0 exists from construction on
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.pool.len() == self.pool.capacity()
    }

    pub fn step_size(&self) -> usize {
        self.step_size
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }
}

impl<'a> IntoIterator for &'a SpinlockBuffer {
    type Item = u32;
    type IntoIter = Sequence<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the values of a [`SpinlockBuffer`] in sequence order
pub struct Sequence<'a> {
    pool: &'a NodePool,
    current: NodeIndex,
    remaining: usize,
}

impl Iterator for Sequence<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let value = self.pool.value(self.current);
        self.current = self.pool.next(self.current);
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Sequence<'_> {}

impl FusedIterator for Sequence<'_> {}
