// services/commission.rs
//
// Tiered platform commission over the checkout amount. Pure arithmetic on
// whole XAF; callers validate amount > 0 before asking for a split.

/// Platform markup percentage for a given amount. Upper bounds are inclusive.
pub fn markup_percentage(amount: i64) -> i64 {
    match amount {
        ..=50_000 => 15,
        ..=100_000 => 20,
        ..=300_000 => 25,
        ..=1_000_000 => 30,
        _ => 35,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommissionSplit {
    pub commission: i64,
    pub vendor_amount: i64,
}

/// Splits `amount` into the platform commission and the vendor's share.
/// The commission is floored to a whole XAF and the vendor receives the
/// remainder, so `commission + vendor_amount == amount` holds exactly.
pub fn split(amount: i64) -> CommissionSplit {
    let pct = markup_percentage(amount);
    let commission = amount * pct / 100;
    CommissionSplit {
        commission,
        vendor_amount: amount - commission,
    }
}
