use soroban_sdk::{contracttype, Address};

/// Discriminator of the two position variants
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PositionKind {
    /// Cash deposited now, face value claimable at maturity
    Lend,
    /// Cash received now against collateral, face value owed at maturity
    Borrow,
}

/// A single lend or borrow obligation, keyed by an incrementing id.
/// Immutable after creation except for the `active` flag.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Position {
    /// Holder of the claim (lend) or the debt (borrow)
    pub owner: Address,
    /// Bond face due at maturity (WAD)
    pub face_value: u128,
    /// Absolute ledger time when the bond pays par
    pub maturity: u64,
    /// Cash posted as collateral; zero for lend positions (WAD)
    pub collateral: u128,
    /// Present value at creation; basis of the grown-liability release (WAD)
    pub initial_pv: u128,
    /// Ledger time of creation
    pub created_at: u64,
    /// Variant discriminator
    pub kind: PositionKind,
    /// Live flag; once cleared, never set again
    pub active: bool,
}

impl Position {
    pub fn is_borrow(&self) -> bool {
        self.kind == PositionKind::Borrow
    }
}
