//! LZ4 block compression and decompression.
//!
//! One block holds one whole input buffer; there is no streaming state and
//! no dictionary.  Each encode call builds its own match-finder index and
//! drops it on return, so calls are independent and reentrant.

pub mod compress;
pub mod decompress;
pub mod match_finder;
pub mod token;
pub mod types;

// Re-export the most important public API items at the module level.
pub use compress::{
    compress_block, compress_block_default, compress_block_into, compress_block_level,
    compress_bound,
};
pub use decompress::{copy_back_reference, decompress_block, decompress_block_into};
pub use match_finder::{Match, MatchFinder};
pub use token::{Token, TokenReader};
pub use types::{CompressParams, LZ4_DISTANCE_MAX, LZ4_MAX_INPUT_SIZE};
