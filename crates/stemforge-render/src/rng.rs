//! Deterministic RNG using PCG32 with BLAKE3 seed derivation.
//!
//! All randomness in the engine flows through this module so renders are
//! reproducible. Each synthesis voice gets an independent stream derived
//! from the job seed and the voice name.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The seed is expanded to 64 bits by duplicating the value in both halves.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Derives an independent seed for a named voice from the job seed.
///
/// Hashes the seed's little-endian bytes concatenated with the voice name
/// via BLAKE3 and truncates to a `u32`.
pub fn derive_voice_seed(base_seed: u32, voice: &str) -> u32 {
    let mut input = Vec::with_capacity(4 + voice.len());
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(voice.as_bytes());

    let hash = blake3::hash(&input);
    let bytes: [u8; 4] = hash.as_bytes()[0..4]
        .try_into()
        .expect("hash always has at least 4 bytes");
    u32::from_le_bytes(bytes)
}

/// Creates the RNG for a named voice.
pub fn create_voice_rng(base_seed: u32, voice: &str) -> Pcg32 {
    create_rng(derive_voice_seed(base_seed, voice))
}
