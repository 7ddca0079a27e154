//! Deterministic per-edge color derivation.
//!
//! Each edge gets a `#rrggbb` color derived from a hash of its endpoint
//! identifiers, so the same edge is colored the same way on every run and on
//! every machine. The hash is FNV-1a 32-bit as an explicit contract rather
//! than an implementation-defined one.

use rand::{RngExt, SeedableRng, rngs::StdRng};

use crate::config::EdgeColorConfig;

/// FNV-1a 32-bit hash over the UTF-8 bytes of `text`.
pub(crate) fn fnv1a32(text: &str) -> u32 {
    const OFFSET_BASIS: u32 = 0x811c_9dc5;
    const PRIME: u32 = 16_777_619;

    let mut hash = OFFSET_BASIS;
    for byte in text.bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

/// Derive the color for an edge from its endpoint identifiers.
///
/// Channel values are decimal digit groups of the combined hash: position p
/// in {0,1,2} yields blue, green, red as `(hash / 10^(3p)) % 1000 % 255`.
/// When all three channels exceed the contrast threshold the color would be
/// near-invisible against a light background, so one channel is clamped to
/// the threshold; the channel choice is drawn from an RNG seeded with the
/// edge hash, keeping the result stable per endpoint pair.
pub(crate) fn edge_color(source: &str, destination: &str, config: &EdgeColorConfig) -> String {
    let edge_hash = u64::from(fnv1a32(source)) + u64::from(fnv1a32(destination));

    let mut blue = channel(edge_hash, 0);
    let mut green = channel(edge_hash, 1);
    let mut red = channel(edge_hash, 2);

    let threshold = config.contrast_threshold();
    if red > threshold && green > threshold && blue > threshold {
        let mut rng = StdRng::seed_from_u64(edge_hash);
        match rng.random_range(0..3u8) {
            0 => red = threshold,
            1 => green = threshold,
            _ => blue = threshold,
        }
    }

    format!(
        "#{:02x}{:02x}{:02x}",
        red.min(255),
        green.min(255),
        blue.min(255)
    )
}

fn channel(edge_hash: u64, position: u32) -> u32 {
    let divisor = 10u64.pow(3 * position);
    ((edge_hash / divisor) % 1000) as u32 % 255
}
