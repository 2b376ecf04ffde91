//! Deterministic hash-based identity for registered entities.
//!
//! [`TypeHash`] is a 64-bit hash computed from qualified names (classes,
//! exceptions) or from owner + name + signature (methods). Hashes are stable
//! across runs, so a generator can cross-reference manifest entries without
//! depending on registration order.
//!
//! # Examples
//!
//! ```
//! use dune_pymor_core::TypeHash;
//!
//! let a = TypeHash::from_name("Dune::Pymor::Parametric");
//! let b = TypeHash::from_name("Dune::Pymor::Parametric");
//! assert_eq!(a, b);
//!
//! let owner = TypeHash::from_name("Dune::Pymor::Functionals::VectorBased");
//! let source = TypeHash::from_name("const Vector &");
//! let apply1 = TypeHash::from_method(owner, "apply", &[source], true, false);
//! let apply2 = TypeHash::from_method(owner, "apply", &[source, source], true, false);
//! assert_ne!(apply1, apply2);
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain-specific mixing constants.
///
/// Classes, exceptions and methods sharing a name still hash differently.
pub mod hash_constants {
    /// Separator constant for sequence components.
    pub const SEP: u64 = 0x4bc94d6bd06053ad;

    /// Domain marker for class and interface hashes.
    pub const TYPE: u64 = 0x2fac10b63a6cc57c;

    /// Domain marker for exception hashes.
    pub const EXCEPTION: u64 = 0x6c1d4e0f9a3b7285;

    /// Domain marker for method hashes.
    pub const METHOD: u64 = 0x7d3c8b4a92e15f6d;

    /// Parameter position mixing constants.
    pub const PARAM_MARKERS: [u64; 16] = [
        0x9e3779b97f4a7c15,
        0xbf58476d1ce4e5b9,
        0x94d049bb133111eb,
        0xd6e8feb86659fd93,
        0xe7037ed1a0b428db,
        0xc6a4a7935bd1e995,
        0x8648dbbc94d49b8d,
        0xa2b48b2c69e0d657,
        0x7c3e9f2a5b8d1403,
        0x5d8c7b4a3e9f2106,
        0x3f1e9d8c7b5a4203,
        0x1a2b3c4d5e6f7089,
        0x9f8e7d6c5b4a3210,
        0x2468ace013579bdf,
        0xfdb97531eca86420,
        0x123456789abcdef0,
    ];
}

/// A deterministic 64-bit hash identifying a class, exception or method.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Create a hash from a qualified class name.
    #[inline]
    pub fn from_name(name: &str) -> Self {
        TypeHash(hash_constants::TYPE ^ xxh64(name.as_bytes(), 0))
    }

    /// Create a hash from a qualified exception name.
    #[inline]
    pub fn from_exception(name: &str) -> Self {
        TypeHash(hash_constants::EXCEPTION ^ xxh64(name.as_bytes(), 0))
    }

    /// Create a method hash from owner, native name, parameter type hashes and
    /// the const/static qualifiers.
    ///
    /// Parameter order matters, so the two `apply` overloads of a functional
    /// get distinct hashes.
    #[inline]
    pub fn from_method(
        owner: TypeHash,
        name: &str,
        param_hashes: &[TypeHash],
        is_const: bool,
        is_static: bool,
    ) -> Self {
        let modifier = if is_const { 0x1 } else { 0x0 } | if is_static { 0x2 } else { 0x0 };
        let seed = hash_constants::METHOD ^ owner.0 ^ xxh64(name.as_bytes(), 0) ^ modifier;
        TypeHash(mix_sequence(seed, param_hashes))
    }
}

fn mix_sequence(seed: u64, items: &[TypeHash]) -> u64 {
    let mut hash = seed;
    for (i, item) in items.iter().enumerate() {
        let marker = hash_constants::PARAM_MARKERS
            .get(i)
            .copied()
            .unwrap_or_else(|| hash_constants::PARAM_MARKERS[0].wrapping_add(i as u64));
        // wrapping_mul keeps the mix order-sensitive
        hash = hash.wrapping_mul(hash_constants::SEP).wrapping_add(marker ^ item.0);
    }
    hash
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
