//! Token model of the block format: serialization and parsing.
//!
//! A block is a series of *sequences*.  Each sequence starts with a token
//! byte whose high nibble is the literal count and whose low nibble is the
//! match length minus [`MINMATCH`]; a nibble of 15 is extended by following
//! bytes (each 255 continues, anything smaller terminates).
//!
//! ```text
//! token | lit-len ext* | literals | distance (LE16) | match-len ext*
//! ```
//!
//! The last sequence of a block carries literals only.  [`TokenReader`]
//! splits every sequence into at most two [`Token`]s, a literal run and a
//! back-reference, and reports structural problems as
//! [`CodecError::TruncatedStream`] or [`CodecError::CorruptStream`].
//! Distance-versus-history checks belong to the decoder, which is the only
//! place that knows how much output exists.

use super::types::{read_le16, MINMATCH, ML_BITS, ML_MASK, RUN_MASK};
use crate::error::CodecError;

/// One unit of the compressed format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// Bytes copied verbatim to the output.
    LiteralRun(&'a [u8]),
    /// Copy `length` bytes starting `distance` bytes behind the write
    /// position.  `distance < length` is valid and means the copy overlaps
    /// its own output.
    BackReference { distance: usize, length: usize },
}

// ─────────────────────────────────────────────────────────────────────────────
// Serialization
// ─────────────────────────────────────────────────────────────────────────────

/// Append the extension bytes for a length that overflowed its nibble.
#[inline]
fn write_length_ext(out: &mut Vec<u8>, mut len: usize) {
    while len >= 255 {
        out.push(255);
        len -= 255;
    }
    out.push(len as u8);
}

/// Append one full sequence: `literals` followed by a back-reference.
///
/// `distance` must be in `1..=65535` and `match_length >= MINMATCH`.
pub fn write_sequence(out: &mut Vec<u8>, literals: &[u8], distance: usize, match_length: usize) {
    debug_assert!((1..=u16::MAX as usize).contains(&distance));
    debug_assert!(match_length >= MINMATCH);

    let lit_len = literals.len();
    let match_code = match_length - MINMATCH;

    let lit_nibble = lit_len.min(RUN_MASK as usize) as u8;
    let match_nibble = match_code.min(ML_MASK as usize) as u8;
    out.push((lit_nibble << ML_BITS) | match_nibble);

    if lit_len >= RUN_MASK as usize {
        write_length_ext(out, lit_len - RUN_MASK as usize);
    }
    out.extend_from_slice(literals);

    out.extend_from_slice(&(distance as u16).to_le_bytes());

    if match_code >= ML_MASK as usize {
        write_length_ext(out, match_code - ML_MASK as usize);
    }
}

/// Append the final, literals-only sequence that closes every block.
pub fn write_last_literals(out: &mut Vec<u8>, literals: &[u8]) {
    let lit_len = literals.len();
    if lit_len >= RUN_MASK as usize {
        out.push((RUN_MASK << ML_BITS) as u8);
        write_length_ext(out, lit_len - RUN_MASK as usize);
    } else {
        out.push((lit_len as u8) << ML_BITS);
    }
    out.extend_from_slice(literals);
}

/// Serialize a token slice into a block.  Consecutive literal runs are
/// merged; a trailing literals-only sequence is always written.
///
/// Mostly useful for crafting streams by hand.  Panics if a back-reference
/// has a distance outside `1..=65535` or a length below `MINMATCH`.
pub fn write_tokens(tokens: &[Token<'_>]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut pending: Vec<u8> = Vec::new();
    for token in tokens {
        match *token {
            Token::LiteralRun(bytes) => pending.extend_from_slice(bytes),
            Token::BackReference { distance, length } => {
                assert!((1..=u16::MAX as usize).contains(&distance), "distance out of range");
                assert!(length >= MINMATCH, "back-reference shorter than MINMATCH");
                write_sequence(&mut out, &pending, distance, length);
                pending.clear();
            }
        }
    }
    write_last_literals(&mut out, &pending);
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing
// ─────────────────────────────────────────────────────────────────────────────

/// Iterator over the tokens of one block.
///
/// Yields `Err` at most once; the iterator is exhausted afterwards.  An empty
/// input is reported as [`CodecError::TruncatedStream`]; a block consisting
/// of the single byte `0x00` yields no tokens.
pub struct TokenReader<'a> {
    src: &'a [u8],
    pos: usize,
    /// Low nibble of the current token while its back-reference is pending.
    pending_match: Option<u8>,
    done: bool,
}

impl<'a> TokenReader<'a> {
    pub fn new(src: &'a [u8]) -> Self {
        Self {
            src,
            pos: 0,
            pending_match: None,
            done: false,
        }
    }

    /// Bytes of the block consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Read extension bytes and add them to `base`.
    fn read_length_ext(&mut self, base: usize) -> Result<usize, CodecError> {
        let mut length = base;
        loop {
            let Some(&byte) = self.src.get(self.pos) else {
                return Err(CodecError::TruncatedStream);
            };
            self.pos += 1;
            length = length
                .checked_add(byte as usize)
                .ok_or(CodecError::CorruptStream)?;
            if byte != 255 {
                return Ok(length);
            }
        }
    }

    fn read_literals(&mut self) -> Result<Token<'a>, CodecError> {
        let token = self.src[self.pos];
        self.pos += 1;

        let mut lit_len = (token >> ML_BITS) as usize;
        if lit_len == RUN_MASK as usize {
            lit_len = self.read_length_ext(lit_len)?;
        }

        let remaining = self.src.len() - self.pos;
        if lit_len > remaining {
            return Err(CodecError::TruncatedStream);
        }
        let literals = &self.src[self.pos..self.pos + lit_len];
        self.pos += lit_len;

        // A sequence that reaches the end of the block has no match part.
        if self.pos < self.src.len() {
            self.pending_match = Some(token & ML_MASK as u8);
        }
        Ok(Token::LiteralRun(literals))
    }

    fn read_back_reference(&mut self, match_nibble: u8) -> Result<Token<'a>, CodecError> {
        if self.src.len() - self.pos < 2 {
            return Err(CodecError::TruncatedStream);
        }
        let distance = read_le16(self.src, self.pos) as usize;
        self.pos += 2;
        if distance == 0 {
            return Err(CodecError::CorruptStream);
        }

        let mut match_code = match_nibble as usize;
        if match_code == ML_MASK as usize {
            match_code = self.read_length_ext(match_code)?;
        }
        let length = match_code
            .checked_add(MINMATCH)
            .ok_or(CodecError::CorruptStream)?;
        Ok(Token::BackReference { distance, length })
    }

    fn next_token(&mut self) -> Option<Result<Token<'a>, CodecError>> {
        loop {
            if let Some(nibble) = self.pending_match.take() {
                return Some(self.read_back_reference(nibble));
            }
            if self.pos >= self.src.len() {
                if self.src.is_empty() {
                    return Some(Err(CodecError::TruncatedStream));
                }
                return None;
            }
            match self.read_literals() {
                // Empty runs carry no data; go straight to the back-reference.
                Ok(Token::LiteralRun(lits)) if lits.is_empty() => continue,
                other => return Some(other),
            }
        }
    }
}

impl<'a> Iterator for TokenReader<'a> {
    type Item = Result<Token<'a>, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.next_token();
        match item {
            None | Some(Err(_)) => self.done = true,
            Some(Ok(_)) => {}
        }
        item
    }
}

impl std::iter::FusedIterator for TokenReader<'_> {}
