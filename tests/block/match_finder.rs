// Integration tests for block::match_finder: hash-chain candidate search.
//
//   - Every returned match is genuine: bytes agree over its whole length
//   - Matches respect the window, MINMATCH and the caller's match_end
//   - More searches never yield a shorter match
//   - Self-overlapping matches are produced for runs

use lz4::block::match_finder::MatchFinder;
use lz4::block::types::{CompressParams, LZ4_DISTANCE_MAX, MINMATCH};

fn params(nb_searches: u32) -> CompressParams {
    CompressParams {
        nb_searches,
        lazy: false,
        accelerate: false,
    }
}

fn sample_text() -> Vec<u8> {
    let words = ["alpha ", "beta ", "gamma ", "delta ", "alphabet ", "betamax "];
    let mut out = Vec::new();
    let mut x = 7u32;
    for _ in 0..600 {
        x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        out.extend_from_slice(words[(x >> 16) as usize % words.len()].as_bytes());
    }
    out
}

#[test]
fn matches_are_genuine_and_bounded() {
    let input = sample_text();
    let match_end = input.len() - 5;
    let mut mf = MatchFinder::new(&input, &params(16)).unwrap();
    let mut found = 0;
    for pos in 0..input.len() - 12 {
        if let Some(m) = mf.find(pos, match_end) {
            found += 1;
            assert_eq!(m.position, pos);
            assert!(m.length >= MINMATCH);
            assert!(m.distance() >= 1 && m.distance() <= LZ4_DISTANCE_MAX);
            assert!(m.end() <= match_end);
            assert_eq!(&input[m.source..m.source + m.length], &input[pos..m.end()]);
        }
    }
    assert!(found > 0);
}

#[test]
fn deeper_search_is_never_worse() {
    let input = sample_text();
    let match_end = input.len() - 5;
    let mut shallow = MatchFinder::new(&input, &params(1)).unwrap();
    let mut deep = MatchFinder::new(&input, &params(64)).unwrap();
    for pos in 0..input.len() - 12 {
        let a = shallow.find(pos, match_end).map_or(0, |m| m.length);
        let b = deep.find(pos, match_end).map_or(0, |m| m.length);
        assert!(b >= a, "pos {pos}: shallow {a} deep {b}");
    }
}

#[test]
fn run_yields_overlapping_match() {
    let mut input = b"header".to_vec();
    input.extend(std::iter::repeat(0xAB).take(500));
    let mut mf = MatchFinder::new(&input, &params(4)).unwrap();
    let m = mf.find(7, input.len() - 5).unwrap();
    assert_eq!(m.distance(), 1);
    assert_eq!(m.end(), input.len() - 5);
}

#[test]
fn skipped_positions_are_still_indexed() {
    // Querying far ahead inserts every position in between.
    let input = b"0123456789ABCDEF................0123456789ABCDEF".to_vec();
    let mut mf = MatchFinder::new(&input, &params(4)).unwrap();
    let m = mf.find(32, input.len()).unwrap();
    assert_eq!(m.source, 0);
    assert_eq!(m.length, 16);
    assert_eq!(mf.next_to_update(), 32);
}
