//! Per-round seeds derived from the game seed.
//!
//! A game stores one base seed; every round's deal and every seeded bot
//! draw from a seed derived here so replays stay deterministic.

/// Seed used to shuffle the deck for `round_no`.
pub fn derive_dealing_seed(game_seed: u64, round_no: u32) -> u64 {
    mix(game_seed ^ (round_no as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Seed for a seeded bot sitting at `seat`.
pub fn derive_bot_seed(game_seed: u64, seat: u8) -> u64 {
    mix(game_seed.wrapping_add(0xD1B5_4A32_D192_ED03 ^ seat as u64))
}

// SplitMix64 finalizer.
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
