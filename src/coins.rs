//! Coin purse arithmetic for the four Pathfinder denominations.
//!
//! A [`Coins`] value is either a holding (a purse) or a cost (a price);
//! prices simply leave unused denominations at zero. All affordability
//! math goes through a flat copper-equivalent total.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Copper value of one silver piece.
pub const CP_PER_SP: u64 = 10;
/// Copper value of one gold piece.
pub const CP_PER_GP: u64 = 100;
/// Copper value of one platinum piece.
pub const CP_PER_PP: u64 = 1000;

/// A quantity of coins in the four standard denominations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Coins {
    #[serde(default)]
    pub cp: u64,
    #[serde(default)]
    pub sp: u64,
    #[serde(default)]
    pub gp: u64,
    #[serde(default)]
    pub pp: u64,
}

impl Coins {
    pub fn new(cp: u64, sp: u64, gp: u64, pp: u64) -> Self {
        Self { cp, sp, gp, pp }
    }

    /// Total value in copper pieces.
    ///
    /// Saturates at `u64::MAX` for purses whose combined value exceeds
    /// it; every purse produced by [`Coins::from_cp`] or
    /// [`Coins::purchase`] totals exactly.
    pub fn total_cp(&self) -> u64 {
        self.cp
            .saturating_add(self.sp.saturating_mul(CP_PER_SP))
            .saturating_add(self.gp.saturating_mul(CP_PER_GP))
            .saturating_add(self.pp.saturating_mul(CP_PER_PP))
    }

    /// Total value in gold pieces (fractional).
    pub fn total_gp(&self) -> f64 {
        self.total_cp() as f64 / CP_PER_GP as f64
    }

    /// Decompose a copper total into coins, largest denomination first.
    /// Exact for every `u64` total: `Coins::from_cp(x).total_cp() == x`.
    pub fn from_cp(total: u64) -> Self {
        let pp = total / CP_PER_PP;
        let remainder = total % CP_PER_PP;
        let gp = remainder / CP_PER_GP;
        let remainder = remainder % CP_PER_GP;
        let sp = remainder / CP_PER_SP;
        let cp = remainder % CP_PER_SP;
        Self { cp, sp, gp, pp }
    }

    pub fn is_empty(&self) -> bool {
        self.cp == 0 && self.sp == 0 && self.gp == 0 && self.pp == 0
    }

    /// Pay `price` out of this purse, returning the purse left afterwards.
    ///
    /// Returns `None` when the purse cannot cover the price; that is the
    /// only failure signal, insufficient funds is a normal outcome.
    ///
    /// Change-making runs in two passes. The first keeps as many of the
    /// original platinum, gold, and silver coins (in that order) as the
    /// remaining value affords, so buying a cheap item out of a purse that
    /// already has exact small change does not break the large coins. The
    /// second pass distributes whatever copper value is still unassigned,
    /// largest denomination first, on top of the kept counts. Each pass
    /// alone may leave value undistributed; together they are
    /// total-preserving.
    pub fn purchase(&self, price: &Coins) -> Option<Coins> {
        let cost = price.total_cp();
        let held = self.total_cp();
        if held < cost {
            return None;
        }
        let mut remaining = held - cost;

        let mut pp = self.pp.min(remaining / CP_PER_PP);
        remaining -= pp * CP_PER_PP;
        let mut gp = self.gp.min(remaining / CP_PER_GP);
        remaining -= gp * CP_PER_GP;
        let mut sp = self.sp.min(remaining / CP_PER_SP);
        remaining -= sp * CP_PER_SP;

        // Top up each denomination largest-first. A count that would
        // exceed u64::MAX stops at the cap and the excess carries down
        // into smaller coins; copper absorbs whatever is left.
        let extra = (remaining / CP_PER_PP).min(u64::MAX - pp);
        pp += extra;
        remaining -= extra * CP_PER_PP;
        let extra = (remaining / CP_PER_GP).min(u64::MAX - gp);
        gp += extra;
        remaining -= extra * CP_PER_GP;
        let extra = (remaining / CP_PER_SP).min(u64::MAX - sp);
        sp += extra;
        remaining -= extra * CP_PER_SP;

        Some(Coins {
            cp: remaining,
            sp,
            gp,
            pp,
        })
    }
}

impl fmt::Display for Coins {
    /// Non-zero denominations only, largest first; an em dash when empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "—");
        }
        let mut parts = Vec::new();
        if self.pp > 0 {
            parts.push(format!("{} pp", self.pp));
        }
        if self.gp > 0 {
            parts.push(format!("{} gp", self.gp));
        }
        if self.sp > 0 {
            parts.push(format!("{} sp", self.sp));
        }
        if self.cp > 0 {
            parts.push(format!("{} cp", self.cp));
        }
        write!(f, "{}", parts.join(", "))
    }
}

/// Format an optional price for display.
pub fn price_string(price: Option<&Coins>) -> String {
    match price {
        Some(price) => price.to_string(),
        None => "—".to_string(),
    }
}
