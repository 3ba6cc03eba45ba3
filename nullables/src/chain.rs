//! Nullable chain: a block height that only moves when told to.

use std::cell::Cell;
use tcr_types::BlockHeight;

pub struct NullChain {
    current: Cell<u64>,
}

impl NullChain {
    pub fn new(initial_height: u64) -> Self {
        Self {
            current: Cell::new(initial_height),
        }
    }

    pub fn height(&self) -> BlockHeight {
        BlockHeight::new(self.current.get())
    }

    /// Advance by `blocks` and return the new height.
    pub fn advance(&self, blocks: u64) -> BlockHeight {
        self.current.set(self.current.get().saturating_add(blocks));
        self.height()
    }

    pub fn set(&self, height: u64) {
        self.current.set(height);
    }
}

impl Default for NullChain {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_only_on_request() {
        let chain = NullChain::new(5);
        assert_eq!(chain.height(), BlockHeight::new(5));
        assert_eq!(chain.advance(3), BlockHeight::new(8));
        chain.set(2);
        assert_eq!(chain.height(), BlockHeight::new(2));
    }
}
