//! Nullable nonces: deterministic reveal nonces.

use std::sync::Mutex;

/// Hands out pre-configured nonces in order, cycling when exhausted.
pub struct NullNonces {
    nonces: Vec<[u8; 32]>,
    index: Mutex<usize>,
}

impl NullNonces {
    pub fn new(nonces: Vec<[u8; 32]>) -> Self {
        assert!(!nonces.is_empty(), "at least one nonce required");
        Self {
            nonces,
            index: Mutex::new(0),
        }
    }

    /// Nonces `[1; 32]`, `[2; 32]`, ... `[count; 32]`.
    pub fn sequential(count: u8) -> Self {
        Self::new((1..=count.max(1)).map(|i| [i; 32]).collect())
    }

    pub fn next(&self) -> [u8; 32] {
        let mut idx = match self.index.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let current = *idx % self.nonces.len();
        *idx += 1;
        self.nonces[current]
    }
}
