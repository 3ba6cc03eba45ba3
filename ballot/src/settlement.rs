//! Bond settlement arithmetic.
//!
//! Ratios are basis points over [`BPS_DENOMINATOR`]. Every share truncates
//! towards zero, and the voter pool is the exact complement of the winner's
//! dispensation, so the tokens paid out for one ballot never exceed the
//! tokens locked in it.

use tcr_types::params::BPS_DENOMINATOR;

use crate::BallotError;

const DENOM: u128 = BPS_DENOMINATOR as u128;

/// `floor(amount * bps / 10_000)` without forming the full product.
pub fn bps_share(amount: u128, bps: u32) -> Result<u128, BallotError> {
    let bps = u128::from(bps);
    let whole = (amount / DENOM)
        .checked_mul(bps)
        .ok_or(BallotError::Overflow("bps share"))?;
    let rest = (amount % DENOM) * bps / DENOM;
    whole
        .checked_add(rest)
        .ok_or(BallotError::Overflow("bps share"))
}

/// Whether the approving share of the revealed weight strictly exceeds
/// `quorum_bps`. No revealed weight never passes.
pub fn quorum_reached(approve: u128, deny: u128, quorum_bps: u32) -> Result<bool, BallotError> {
    let total = approve
        .checked_add(deny)
        .ok_or(BallotError::Overflow("vote total"))?;
    if total == 0 {
        return Ok(false);
    }
    let lhs = approve
        .checked_mul(DENOM)
        .ok_or(BallotError::Overflow("quorum"))?;
    let rhs = total
        .checked_mul(u128::from(quorum_bps))
        .ok_or(BallotError::Overflow("quorum"))?;
    Ok(lhs > rhs)
}

/// Paid to the owner when the candidate survives a challenge.
pub fn owner_reward(bond: u128, dispensation_bps: u32) -> Result<u128, BallotError> {
    bps_share(bond, dispensation_bps)
}

/// Paid to the challenger when the candidate is rejected: the challenge bond
/// back plus the dispensation of the owner's bond.
pub fn challenger_reward(bond: u128, dispensation_bps: u32) -> Result<u128, BallotError> {
    bond.checked_add(bps_share(bond, dispensation_bps)?)
        .ok_or(BallotError::Overflow("challenger reward"))
}

/// The loser's bond minus the winner's dispensation, shared by winning voters.
pub fn voter_pool(bond: u128, dispensation_bps: u32) -> Result<u128, BallotError> {
    Ok(bond - bps_share(bond, dispensation_bps)?)
}

/// A winning voter's payout: their stake back plus a pro-rata share of the
/// pool.
pub fn voter_reward(power: u128, pool: u128, winning_total: u128) -> Result<u128, BallotError> {
    if winning_total == 0 {
        return Ok(power);
    }
    let share = pool
        .checked_mul(power)
        .ok_or(BallotError::Overflow("voter reward"))?
        / winning_total;
    power
        .checked_add(share)
        .ok_or(BallotError::Overflow("voter reward"))
}
