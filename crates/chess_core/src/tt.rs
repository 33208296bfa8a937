//! Shared transposition cache.
//!
//! A fixed-size table indexed by `hash % len`. Workers read and write it
//! concurrently without locks. Every cached word is stored next to a tag equal
//! to `hash ^ data`, and a read only succeeds when the tag matches the hash
//! being looked up. A slot last written for another position, or a pair of
//! words torn by a concurrent writer, therefore reads as a miss. Losing an
//! entry only costs a recomputation; it never changes a result.

use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::bitboard::Bitboard;
use crate::types::Color;

const EVAL_VALID: u64 = 1 << 32;
const CHECK_KNOWN: [u64; 2] = [1 << 33, 1 << 35];
const CHECK_SET: [u64; 2] = [1 << 34, 1 << 36];

const SEARCH_VALID: u64 = 1 << 48;
const SEARCH_PV: u64 = 1 << 49;

#[derive(Default)]
struct TaggedWord {
    data: AtomicU64,
    tag: AtomicU64,
}

impl TaggedWord {
    #[inline]
    fn load(&self, hash: u64) -> Option<u64> {
        let data = self.data.load(Ordering::Relaxed);
        let tag = self.tag.load(Ordering::Relaxed);
        (tag ^ data == hash).then_some(data)
    }

    #[inline]
    fn store(&self, hash: u64, data: u64) {
        self.data.store(data, Ordering::Relaxed);
        self.tag.store(hash ^ data, Ordering::Relaxed);
    }

    fn reset(&self) {
        self.data.store(0, Ordering::Relaxed);
        self.tag.store(0, Ordering::Relaxed);
    }
}

#[derive(Default)]
struct Slot {
    attacks: [TaggedWord; 2],
    /// Static eval in the low 32 bits, then valid and check-status bits.
    eval: TaggedWord,
    /// Search value (32), depth (8), mate plies (8), valid and PV bits.
    search: TaggedWord,
}

/// Memoized result of a completed search of one position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchMemo {
    pub value: i32,
    pub depth: u8,
    /// Plies to a forced mate, 0 when the value is not a mate score.
    pub mate_plies: u8,
}

pub struct TranspositionTable {
    slots: Box<[Slot]>,
}

static GLOBAL: LazyLock<TranspositionTable> =
    LazyLock::new(|| TranspositionTable::new(TranspositionTable::DEFAULT_SIZE));

impl TranspositionTable {
    /// Reference size: 2^20 slots.
    pub const DEFAULT_SIZE: usize = 1 << 20;

    pub fn new(size: usize) -> Self {
        tracing::trace!(slots = size, "allocating transposition table");
        let slots = (0..size).map(|_| Slot::default()).collect();
        Self { slots }
    }

    /// A zero-slot table: every lookup misses and every store is dropped.
    pub fn disabled() -> Self {
        Self::new(0)
    }

    /// The process-wide table shared by every search.
    pub fn global() -> &'static TranspositionTable {
        &GLOBAL
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the entry for `hash`. Fields cached for any other position
    /// sharing the slot read as empty, and the first store re-keys them.
    #[inline]
    pub fn lookup(&self, hash: u64) -> Entry<'_> {
        let slot = if self.slots.is_empty() {
            None
        } else {
            Some(&self.slots[(hash % self.slots.len() as u64) as usize])
        };
        Entry { hash, slot }
    }

    pub fn clear(&self) {
        for slot in self.slots.iter() {
            slot.attacks[0].reset();
            slot.attacks[1].reset();
            slot.eval.reset();
            slot.search.reset();
        }
    }
}

/// A view of one slot bound to the hash it was looked up with.
#[derive(Clone, Copy)]
pub struct Entry<'a> {
    hash: u64,
    slot: Option<&'a Slot>,
}

impl Entry<'_> {
    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn attacks(&self, color: Color) -> Option<Bitboard> {
        let slot = self.slot?;
        slot.attacks[color.idx()].load(self.hash).map(Bitboard)
    }

    pub fn store_attacks(&self, color: Color, attacks: Bitboard) {
        if let Some(slot) = self.slot {
            slot.attacks[color.idx()].store(self.hash, attacks.0);
        }
    }

    pub fn is_checked(&self, color: Color) -> Option<bool> {
        let word = self.slot?.eval.load(self.hash)?;
        let i = color.idx();
        (word & CHECK_KNOWN[i] != 0).then_some(word & CHECK_SET[i] != 0)
    }

    pub fn store_checked(&self, color: Color, checked: bool) {
        let Some(slot) = self.slot else { return };
        let i = color.idx();
        let mut word = slot.eval.load(self.hash).unwrap_or(0);
        word |= CHECK_KNOWN[i];
        if checked {
            word |= CHECK_SET[i];
        } else {
            word &= !CHECK_SET[i];
        }
        slot.eval.store(self.hash, word);
    }

    pub fn static_eval(&self) -> Option<i32> {
        let word = self.slot?.eval.load(self.hash)?;
        (word & EVAL_VALID != 0).then_some(word as u32 as i32)
    }

    pub fn store_static_eval(&self, value: i32) {
        let Some(slot) = self.slot else { return };
        let flags = slot.eval.load(self.hash).unwrap_or(0) & !0xFFFF_FFFF;
        slot.eval
            .store(self.hash, flags | EVAL_VALID | value as u32 as u64);
    }

    pub fn search(&self) -> Option<SearchMemo> {
        let word = self.slot?.search.load(self.hash)?;
        if word & SEARCH_VALID == 0 {
            return None;
        }
        Some(SearchMemo {
            value: word as u32 as i32,
            depth: (word >> 32) as u8,
            mate_plies: (word >> 40) as u8,
        })
    }

    pub fn store_search(&self, memo: SearchMemo) {
        let Some(slot) = self.slot else { return };
        let pv = slot.search.load(self.hash).unwrap_or(0) & SEARCH_PV;
        let word = memo.value as u32 as u64
            | (memo.depth as u64) << 32
            | (memo.mate_plies as u64) << 40
            | SEARCH_VALID
            | pv;
        slot.search.store(self.hash, word);
    }

    /// Whether this position was the winning child of a completed search.
    pub fn is_pv(&self) -> bool {
        self.slot
            .and_then(|slot| slot.search.load(self.hash))
            .is_some_and(|word| word & SEARCH_PV != 0)
    }

    pub fn mark_pv(&self) {
        let Some(slot) = self.slot else { return };
        let word = slot.search.load(self.hash).unwrap_or(0);
        slot.search.store(self.hash, word | SEARCH_PV);
    }
}

#[cfg(test)]
#[path = "tt_tests.rs"]
mod tt_tests;
