//! Hash functions for the hashing trick.
//!
//! - [`HashType::Std`] uses the standard library hasher and ignores the seed.
//!   It is deterministic within one build, but the standard library does not
//!   fix its algorithm: bins (and so exported models) produced with it may
//!   differ after a Rust toolchain upgrade. Models meant to outlive the build
//!   should use one of the Murmur variants.
//! - [`HashType::Murmur2`] is MurmurHash64A.
//! - [`HashType::Murmur3`] is MurmurHash3 x64/128, keeping the first 64-bit
//!   word of the digest.
//!
//! The Murmur functions read the input bytes as little-endian words so
//! results do not depend on the host platform.
use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use crate::ftrl::core::params::HashType;

/// Hash `bytes` with the selected function.
pub fn hash_bytes(hash_type: HashType, bytes: &[u8], seed: u32) -> u64 {
    match hash_type {
        HashType::Std => std_hash(bytes),
        HashType::Murmur2 => murmur2_64a(bytes, u64::from(seed)),
        HashType::Murmur3 => murmur3_x64_128(bytes, seed).0,
    }
}

/// `DefaultHasher` with its fixed keys (no `RandomState`), so the value is
/// the same in every process of one build. Not stable across Rust releases.
pub fn std_hash(bytes: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    hasher.finish()
}

fn read_u64(chunk: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(chunk);
    u64::from_le_bytes(buf)
}

/// MurmurHash64A by Austin Appleby.
pub fn murmur2_64a(bytes: &[u8], seed: u64) -> u64 {
    const M: u64 = 0xc6a4_a793_5bd1_e995;
    const R: u32 = 47;

    let mut h = seed ^ (bytes.len() as u64).wrapping_mul(M);

    let mut chunks = bytes.chunks_exact(8);
    for chunk in &mut chunks {
        let mut k = read_u64(chunk);
        k = k.wrapping_mul(M);
        k ^= k >> R;
        k = k.wrapping_mul(M);
        h ^= k;
        h = h.wrapping_mul(M);
    }

    let tail = chunks.remainder();
    if !tail.is_empty() {
        for (i, &byte) in tail.iter().enumerate() {
            h ^= u64::from(byte) << (8 * i);
        }
        h = h.wrapping_mul(M);
    }

    h ^= h >> R;
    h = h.wrapping_mul(M);
    h ^= h >> R;
    h
}

#[inline]
fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51_afd7_ed55_8ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    k ^= k >> 33;
    k
}

/// MurmurHash3 x64/128 by Austin Appleby; returns both 64-bit words.
pub fn murmur3_x64_128(bytes: &[u8], seed: u32) -> (u64, u64) {
    const C1: u64 = 0x87c3_7b91_1142_53d5;
    const C2: u64 = 0x4cf5_ad43_2745_937f;

    let mut h1 = u64::from(seed);
    let mut h2 = u64::from(seed);

    let mut blocks = bytes.chunks_exact(16);
    for block in &mut blocks {
        let mut k1 = read_u64(&block[..8]);
        let mut k2 = read_u64(&block[8..]);

        k1 = k1.wrapping_mul(C1).rotate_left(31).wrapping_mul(C2);
        h1 ^= k1;
        h1 = h1.rotate_left(27).wrapping_add(h2).wrapping_mul(5).wrapping_add(0x52dc_e729);

        k2 = k2.wrapping_mul(C2).rotate_left(33).wrapping_mul(C1);
        h2 ^= k2;
        h2 = h2.rotate_left(31).wrapping_add(h1).wrapping_mul(5).wrapping_add(0x3849_5ab5);
    }

    let tail = blocks.remainder();
    let mut k1 = 0u64;
    let mut k2 = 0u64;
    for (i, &byte) in tail.iter().enumerate().skip(8) {
        k2 ^= u64::from(byte) << (8 * (i - 8));
    }
    if tail.len() > 8 {
        k2 = k2.wrapping_mul(C2).rotate_left(33).wrapping_mul(C1);
        h2 ^= k2;
    }
    for (i, &byte) in tail.iter().enumerate().take(8) {
        k1 ^= u64::from(byte) << (8 * i);
    }
    if !tail.is_empty() {
        k1 = k1.wrapping_mul(C1).rotate_left(31).wrapping_mul(C2);
        h1 ^= k1;
    }

    let len = bytes.len() as u64;
    h1 ^= len;
    h2 ^= len;
    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);
    h1 = fmix64(h1);
    h2 = fmix64(h2);
    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);
    (h1, h2)
}
