//! Logical namespaces of the key-value space.

use std::fmt;

/// A logical namespace. Each backend maps a column to its own table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    /// Identifier → Ballot. Also holds the application queue under a reserved key.
    Ballots,
    /// Identifier → Listing.
    Listings,
    /// (voter, identifier) → commitment bytes.
    Commitments,
    /// (voter, identifier) → Vote.
    Votes,
    /// (voter, identifier) → empty marker once a reward has been claimed.
    Claims,
    /// Account → balance.
    Accounts,
    /// Node bookkeeping (last height, genesis marker).
    Meta,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Ballots,
        Column::Listings,
        Column::Commitments,
        Column::Votes,
        Column::Claims,
        Column::Accounts,
        Column::Meta,
    ];

    /// Stable table name used by persistent backends.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ballots => "ballots",
            Self::Listings => "listings",
            Self::Commitments => "commitments",
            Self::Votes => "votes",
            Self::Claims => "claims",
            Self::Accounts => "accounts",
            Self::Meta => "meta",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
