//! Cache key generation
//!
//! FNV-1a over the code and file name. The cache is a performance
//! optimization, not a security boundary, so a cheap deterministic
//! non-cryptographic hash is the right tool; upgrading to a cryptographic
//! digest would buy nothing here.

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Deterministic fingerprint of a (code, fileName) request.
///
/// A NUL separator between the two fields keeps ("ab", "c") and ("a", "bc")
/// from colliding by concatenation.
pub fn fingerprint(code: &str, file_name: &str) -> String {
    let mut hash = FNV_OFFSET_BASIS;

    for byte in code.bytes().chain(std::iter::once(0)).chain(file_name.bytes()) {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }

    format!("{hash:016x}")
}
