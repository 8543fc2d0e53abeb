//! Bit-packed ref kinds for synthesized delegate names.
//!
//! Each slot takes three bits: slot `i` occupies bits `3i..3i+3`, low bit
//! first, and a slot may straddle two words. The textual form lists the
//! 32-bit words as eight uppercase hex digits, comma-separated, in braces:
//! `{00000009}` for `(ref, ref)` followed by a by-value return.

use std::fmt;

use smallvec::SmallVec;

use crate::RefKind;

const BITS_PER_REF_KIND: usize = 3;
const BITS_PER_WORD: usize = u32::BITS as usize;

/// Fixed-capacity vector of `RefKind`s.
///
/// The default value is the null vector: capacity zero, no words. Delegate
/// names omit the ref-kind segment entirely for it.
#[derive(Clone, Eq, PartialEq, Hash, Default)]
pub struct RefKindVector {
    words: SmallVec<[u32; 2]>,
    capacity: usize,
}

impl RefKindVector {
    /// All-`None` vector with room for `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity * 3` bits overflow `usize`.
    pub fn create(capacity: usize) -> Self {
        let words = word_count(capacity)
            .unwrap_or_else(|| panic!("ref kind capacity {capacity} overflows"));
        RefKindVector {
            words: SmallVec::from_elem(0, words),
            capacity,
        }
    }

    /// Vector holding `kinds` in order.
    pub fn from_kinds(kinds: &[RefKind]) -> Self {
        let mut vector = Self::create(kinds.len());
        for (index, kind) in kinds.iter().enumerate() {
            vector.set(index, *kind);
        }
        vector
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.capacity == 0
    }

    /// Kind stored at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    pub fn get(&self, index: usize) -> RefKind {
        assert!(index < self.capacity, "ref kind index {index} out of range");
        let mut bits = 0u8;
        for offset in 0..BITS_PER_REF_KIND {
            if self.bit(index * BITS_PER_REF_KIND + offset) {
                bits |= 1 << offset;
            }
        }
        // `set` and `try_parse` only ever store valid patterns.
        RefKind::from_bits(bits).unwrap_or_else(|| unreachable!("invalid ref kind bits {bits}"))
    }

    /// Store `kind` at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    pub fn set(&mut self, index: usize, kind: RefKind) {
        assert!(index < self.capacity, "ref kind index {index} out of range");
        let bits = kind.to_bits();
        for offset in 0..BITS_PER_REF_KIND {
            self.set_bit(index * BITS_PER_REF_KIND + offset, bits & (1 << offset) != 0);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = RefKind> + '_ {
        (0..self.capacity).map(|index| self.get(index))
    }

    /// Textual form embedded in delegate names, e.g. `{00000009}`.
    pub fn to_ref_kind_string(&self) -> String {
        let mut out = String::with_capacity(2 + self.words.len() * 9);
        out.push('{');
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(&format!("{word:08X}"));
        }
        out.push('}');
        out
    }

    /// Parse the textual form back into a vector of `capacity` slots.
    ///
    /// The surrounding braces are optional but must be balanced. Returns
    /// `None` on malformed hex, a word count that does not match
    /// `capacity`, bits set beyond `capacity`, or an unassigned pattern.
    pub fn try_parse(text: &str, capacity: usize) -> Option<Self> {
        let body = match (text.strip_prefix('{'), text.ends_with('}')) {
            (Some(inner), true) => inner.strip_suffix('}')?,
            (None, false) => text,
            _ => return None,
        };

        // Checked before allocating: `capacity` comes from untrusted metadata.
        let expected_words = word_count(capacity)?;
        let actual_words = if body.is_empty() {
            0
        } else {
            body.split(',').count()
        };
        if actual_words != expected_words {
            return None;
        }
        let mut words: SmallVec<[u32; 2]> = SmallVec::with_capacity(expected_words);
        if !body.is_empty() {
            for chunk in body.split(',') {
                words.push(parse_hex_word(chunk)?);
            }
        }

        let vector = RefKindVector { words, capacity };
        let used_bits = capacity * BITS_PER_REF_KIND;
        let total_bits = expected_words * BITS_PER_WORD;
        if (used_bits..total_bits).any(|bit| vector.bit(bit)) {
            return None;
        }
        let all_valid = (0..capacity).all(|index| {
            let mut bits = 0u8;
            for offset in 0..BITS_PER_REF_KIND {
                if vector.bit(index * BITS_PER_REF_KIND + offset) {
                    bits |= 1 << offset;
                }
            }
            RefKind::from_bits(bits).is_some()
        });
        all_valid.then_some(vector)
    }

    #[inline]
    fn bit(&self, bit: usize) -> bool {
        self.words[bit / BITS_PER_WORD] & (1 << (bit % BITS_PER_WORD)) != 0
    }

    #[inline]
    fn set_bit(&mut self, bit: usize, value: bool) {
        let mask = 1u32 << (bit % BITS_PER_WORD);
        let word = &mut self.words[bit / BITS_PER_WORD];
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }
}

fn word_count(capacity: usize) -> Option<usize> {
    Some(capacity.checked_mul(BITS_PER_REF_KIND)?.div_ceil(BITS_PER_WORD))
}

/// One to eight hex digits, no sign or prefix.
fn parse_hex_word(chunk: &str) -> Option<u32> {
    if chunk.is_empty() || chunk.len() > 8 || !chunk.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(chunk, 16).ok()
}

impl fmt::Debug for RefKindVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for RefKindVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ref_kind_string())
    }
}
