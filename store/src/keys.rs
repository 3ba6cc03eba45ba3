//! Composite key layouts.

use tcr_types::{AccountAddress, Identifier};

/// Key for per-voter records: `u16 BE voter length ‖ voter ‖ identifier`.
///
/// The length prefix keeps `("tcr_a", "bc")` and `("tcr_ab", "c")` apart and
/// makes a voter's records a contiguous prefix range. Addresses are at most
/// [`AccountAddress::MAX_LEN`] bytes, so the length always fits the prefix.
pub fn voter_key(voter: &AccountAddress, identifier: &Identifier) -> Vec<u8> {
    let v = voter.as_bytes();
    let id = identifier.as_bytes();
    let mut key = Vec::with_capacity(2 + v.len() + id.len());
    key.extend_from_slice(&voter_len(v));
    key.extend_from_slice(v);
    key.extend_from_slice(id);
    key
}

/// Prefix shared by every [`voter_key`] of `voter`.
pub fn voter_prefix(voter: &AccountAddress) -> Vec<u8> {
    let v = voter.as_bytes();
    let mut key = Vec::with_capacity(2 + v.len());
    key.extend_from_slice(&voter_len(v));
    key.extend_from_slice(v);
    key
}

fn voter_len(voter: &[u8]) -> [u8; 2] {
    u16::try_from(voter.len()).unwrap_or(u16::MAX).to_be_bytes()
}

/// Split a [`voter_key`] back into its identifier part.
pub fn identifier_from_voter_key(key: &[u8]) -> Option<Identifier> {
    let len_bytes: [u8; 2] = key.get(..2)?.try_into().ok()?;
    let voter_len = u16::from_be_bytes(len_bytes) as usize;
    let rest = key.get(2 + voter_len..)?;
    std::str::from_utf8(rest).ok().map(Identifier::new)
}
