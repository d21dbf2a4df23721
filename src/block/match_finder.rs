//! Hash-chain match finder.
//!
//! Locates earlier occurrences of the bytes at the current encode position.
//! Two tables make up the index:
//!
//! | Table         | Entry                                         |
//! |---------------|-----------------------------------------------|
//! | `hash_table`  | most recent position whose 4-byte prefix hashes to the slot |
//! | `chain_table` | delta from a position to the previous position with the same hash (0 = end of chain) |
//!
//! Positions are inserted lazily: [`MatchFinder::find`] first indexes every
//! position in `[next_to_update, pos)` and then walks the chain for `pos`,
//! newest candidate first.  A candidate only replaces the current best when
//! it is strictly longer, so among equal lengths the most recent (smallest
//! distance) wins.
//!
//! The index borrows the input and is dropped with it; nothing survives the
//! encoding of one buffer.

use super::types::{
    chain_size_for, count, hash4, hash_log_for, read32, CompressParams, LZ4_DISTANCE_MAX, MINMATCH,
};
use crate::error::CodecError;

/// Marks an empty hash slot.
const NO_POSITION: u32 = u32::MAX;

/// A match candidate: `length` bytes at `position` repeat bytes found
/// `distance` bytes earlier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    /// Start of the repeated bytes (the encode position).
    pub position: usize,
    /// Start of the earlier occurrence.
    pub source: usize,
    /// Number of matching bytes (≥ `MINMATCH`).
    pub length: usize,
}

impl Match {
    /// Backward distance from `position` to `source` (1..=65535).
    #[inline]
    pub fn distance(&self) -> usize {
        self.position - self.source
    }

    /// First position after the match.
    #[inline]
    pub fn end(&self) -> usize {
        self.position + self.length
    }
}

/// Allocate a table of `len` copies of `value`, reporting allocation failure
/// instead of aborting.
fn try_table<T: Copy>(len: usize, value: T) -> Result<Vec<T>, CodecError> {
    let mut table = Vec::new();
    table.try_reserve_exact(len)?;
    table.resize(len, value);
    Ok(table)
}

/// Hash-chain index over one input buffer.
pub struct MatchFinder<'a> {
    input: &'a [u8],
    hash_table: Vec<u32>,
    chain_table: Vec<u16>,
    chain_mask: usize,
    hash_log: u32,
    next_to_update: usize,
    nb_searches: u32,
}

impl<'a> MatchFinder<'a> {
    /// Build an empty index sized for `input`.
    pub fn new(input: &'a [u8], params: &CompressParams) -> Result<Self, CodecError> {
        let hash_log = hash_log_for(input.len());
        let chain_size = chain_size_for(input.len());
        Ok(Self {
            input,
            hash_table: try_table(1usize << hash_log, NO_POSITION)?,
            chain_table: try_table(chain_size, 0u16)?,
            chain_mask: chain_size - 1,
            hash_log,
            next_to_update: 0,
            nb_searches: params.nb_searches.max(1),
        })
    }

    /// The indexed input.
    #[inline]
    pub fn input(&self) -> &'a [u8] {
        self.input
    }

    /// Next position that has not been inserted yet.
    #[inline]
    pub fn next_to_update(&self) -> usize {
        self.next_to_update
    }

    #[inline(always)]
    fn hash_at(&self, pos: usize) -> usize {
        hash4(read32(self.input, pos), self.hash_log)
    }

    /// Index every position in `[next_to_update, target)` that still has a
    /// full 4-byte prefix.
    pub fn insert(&mut self, target: usize) {
        let last_hashable = self.input.len().saturating_sub(MINMATCH - 1);
        let target = target.min(last_hashable);

        while self.next_to_update < target {
            let idx = self.next_to_update;
            let h = self.hash_at(idx);
            let head = self.hash_table[h];
            let delta = if head == NO_POSITION {
                0
            } else {
                let d = idx - head as usize;
                // Beyond the window the chain ends here.
                if d > LZ4_DISTANCE_MAX {
                    0
                } else {
                    d as u16
                }
            };
            self.chain_table[idx & self.chain_mask] = delta;
            self.hash_table[h] = idx as u32;
            self.next_to_update += 1;
        }
    }

    /// Find the best earlier occurrence of the bytes at `pos`.
    ///
    /// The match never extends at or past `match_end`.  Returns `None` when
    /// no candidate in the window shares at least `MINMATCH` bytes.
    ///
    /// `pos + MINMATCH <= match_end <= input.len()` must hold.
    pub fn find(&mut self, pos: usize, match_end: usize) -> Option<Match> {
        debug_assert!(pos + MINMATCH <= match_end && match_end <= self.input.len());
        self.insert(pos);

        let input = self.input;
        let prefix = read32(input, pos);
        let mut candidate = self.hash_table[self.hash_at(pos)];
        let mut attempts = self.nb_searches;
        let mut best: Option<Match> = None;

        while candidate != NO_POSITION && attempts > 0 {
            let cand = candidate as usize;
            if cand >= pos || pos - cand > LZ4_DISTANCE_MAX {
                break;
            }
            attempts -= 1;

            if read32(input, cand) == prefix {
                let length = MINMATCH + count(input, cand + MINMATCH, pos + MINMATCH, match_end);
                if best.map_or(true, |b| length > b.length) {
                    best = Some(Match {
                        position: pos,
                        source: cand,
                        length,
                    });
                    if pos + length == match_end {
                        break; // cannot get any longer
                    }
                }
            }

            let delta = self.chain_table[cand & self.chain_mask] as usize;
            if delta == 0 || delta > cand {
                break;
            }
            candidate = (cand - delta) as u32;
        }

        best
    }
}
