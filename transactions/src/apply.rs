//! Apply transaction: settle a candidate whose current window has closed.

use serde::{Deserialize, Serialize};
use tcr_types::Identifier;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyTx {
    pub identifier: Identifier,
}

impl ApplyTx {
    pub fn new(identifier: Identifier) -> Self {
        Self { identifier }
    }
}
