//! Fixed price-range taxonomy used by the price histogram.

use rust_decimal::Decimal;
use serde::Serialize;

/// One of six price ranges. Upper edges are inclusive, so a price sitting
/// exactly on a boundary belongs to the lower range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceBucket {
    UpTo50,
    UpTo100,
    UpTo200,
    UpTo500,
    UpTo1000,
    Above1000,
}

impl PriceBucket {
    pub const COUNT: usize = 6;

    /// All buckets in report order.
    pub const ALL: [PriceBucket; Self::COUNT] = [
        PriceBucket::UpTo50,
        PriceBucket::UpTo100,
        PriceBucket::UpTo200,
        PriceBucket::UpTo500,
        PriceBucket::UpTo1000,
        PriceBucket::Above1000,
    ];

    /// Bucket a price falls into.
    #[must_use]
    pub fn for_price(price: Decimal) -> Self {
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.upper_bound().is_some_and(|upper| price <= upper))
            .unwrap_or(PriceBucket::Above1000)
    }

    /// Inclusive upper edge, or `None` for the open-ended top bucket.
    #[must_use]
    pub fn upper_bound(self) -> Option<Decimal> {
        match self {
            PriceBucket::UpTo50 => Some(Decimal::from(50)),
            PriceBucket::UpTo100 => Some(Decimal::from(100)),
            PriceBucket::UpTo200 => Some(Decimal::from(200)),
            PriceBucket::UpTo500 => Some(Decimal::from(500)),
            PriceBucket::UpTo1000 => Some(Decimal::from(1000)),
            PriceBucket::Above1000 => None,
        }
    }

    /// Position in [`PriceBucket::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Dashboard axis label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PriceBucket::UpTo50 => "0-50",
            PriceBucket::UpTo100 => "50-100",
            PriceBucket::UpTo200 => "100-200",
            PriceBucket::UpTo500 => "200-500",
            PriceBucket::UpTo1000 => "500-1000",
            PriceBucket::Above1000 => "1000+",
        }
    }
}
