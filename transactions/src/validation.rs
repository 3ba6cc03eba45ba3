//! Transaction validation logic.

use tcr_crypto::commitment::COMMITMENT_LEN;
use tcr_types::{Identifier, MAX_IDENTIFIER_LEN};

use crate::error::TransactionError;
use crate::Transaction;

/// Validate a transaction's structure.
///
/// This performs stateless validation only. Phase, ownership and balance
/// checks are done by the ballot engine. Addresses are already well-formed
/// by construction.
pub fn validate_transaction(tx: &Transaction) -> Result<(), TransactionError> {
    check_identifier(tx.identifier())?;
    match tx {
        Transaction::DeclareCandidacy(tx) => positive(tx.deposit, "deposit"),
        Transaction::Challenge(tx) => positive(tx.bond, "bond"),
        Transaction::Commit(tx) => {
            if tx.commitment.len() != COMMITMENT_LEN {
                return Err(TransactionError::InvalidCommitmentLength {
                    expected: COMMITMENT_LEN,
                    actual: tx.commitment.len(),
                });
            }
            Ok(())
        }
        Transaction::Reveal(tx) => {
            if tx.nonce.is_empty() {
                return Err(TransactionError::EmptyNonce);
            }
            positive(tx.bond, "bond")
        }
        Transaction::Apply(_) | Transaction::ClaimReward(_) => Ok(()),
    }
}

fn check_identifier(identifier: &Identifier) -> Result<(), TransactionError> {
    if identifier.is_empty() {
        return Err(TransactionError::EmptyIdentifier);
    }
    if identifier.is_too_long() {
        return Err(TransactionError::IdentifierTooLong {
            len: identifier.as_str().len(),
            max: MAX_IDENTIFIER_LEN,
        });
    }
    Ok(())
}

fn positive(amount: u128, field: &'static str) -> Result<(), TransactionError> {
    if amount == 0 {
        return Err(TransactionError::ZeroAmount { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ApplyTx, ChallengeTx, CommitTx, DeclareCandidacyTx, RevealTx};
    use tcr_types::AccountAddress;

    fn alice() -> AccountAddress {
        AccountAddress::new("tcr_alice")
    }

    #[test]
    fn zero_amounts_rejected() {
        let declare: Transaction = DeclareCandidacyTx::new(alice(), "x".into(), 0).into();
        assert_eq!(
            declare.validate_basic(),
            Err(TransactionError::ZeroAmount { field: "deposit" })
        );
        let challenge: Transaction = ChallengeTx::new(alice(), "x".into(), 0).into();
        assert_eq!(
            challenge.validate_basic(),
            Err(TransactionError::ZeroAmount { field: "bond" })
        );
        let reveal: Transaction = RevealTx::new(alice(), "x".into(), true, vec![1], 0).into();
        assert!(reveal.validate_basic().is_err());
    }

    #[test]
    fn empty_identifier_rejected() {
        let apply: Transaction = ApplyTx::new("".into()).into();
        assert_eq!(apply.validate_basic(), Err(TransactionError::EmptyIdentifier));
    }

    #[test]
    fn oversized_identifier_rejected_for_every_kind() {
        let long = || Identifier::new("x".repeat(MAX_IDENTIFIER_LEN + 1));
        let txs: [Transaction; 3] = [
            DeclareCandidacyTx::new(alice(), long(), 100).into(),
            ApplyTx::new(long()).into(),
            CommitTx::sealed(alice(), long(), true, b"nonce").into(),
        ];
        for tx in txs {
            assert_eq!(
                tx.validate_basic(),
                Err(TransactionError::IdentifierTooLong {
                    len: MAX_IDENTIFIER_LEN + 1,
                    max: MAX_IDENTIFIER_LEN,
                })
            );
        }
        let at_limit: Transaction =
            ApplyTx::new(Identifier::new("x".repeat(MAX_IDENTIFIER_LEN))).into();
        assert!(at_limit.validate_basic().is_ok());
    }

    #[test]
    fn commitment_length_checked() {
        let short: Transaction = CommitTx::new(alice(), "x".into(), vec![0; 31]).into();
        assert_eq!(
            short.validate_basic(),
            Err(TransactionError::InvalidCommitmentLength {
                expected: 32,
                actual: 31
            })
        );
        let sealed: Transaction = CommitTx::sealed(alice(), "x".into(), true, b"nonce").into();
        assert!(sealed.validate_basic().is_ok());
    }

    #[test]
    fn empty_nonce_rejected() {
        let reveal: Transaction = RevealTx::new(alice(), "x".into(), true, vec![], 5).into();
        assert_eq!(reveal.validate_basic(), Err(TransactionError::EmptyNonce));
    }
}
