//! Blocks as supplied by the execution context: a height and the
//! transactions ordered within it.

use serde::{Deserialize, Serialize};
use tcr_transactions::Transaction;
use tcr_types::BlockHeight;

use crate::NodeError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub height: BlockHeight,
    #[serde(default)]
    pub txs: Vec<Transaction>,
}

impl Block {
    pub fn new(height: BlockHeight, txs: Vec<Transaction>) -> Self {
        Self { height, txs }
    }

    /// Parse a JSON array of blocks.
    pub fn list_from_json(raw: &str) -> Result<Vec<Block>, NodeError> {
        serde_json::from_str(raw).map_err(|e| NodeError::BlockFile(e.to_string()))
    }
}
