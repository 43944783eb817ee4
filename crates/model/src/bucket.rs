/// Price interval `[min, max)`. `max = None` is unbounded above.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: Option<f64>,
}

impl PriceRange {
    pub const fn new(min: f64, max: Option<f64>) -> Self {
        PriceRange { min, max }
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && self.max.map_or(true, |max| price < max)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceBucket {
    pub label: &'static str,
    pub range: PriceRange,
}

const fn bucket(label: &'static str, min: f64, max: Option<f64>) -> PriceBucket {
    PriceBucket {
        label,
        range: PriceRange::new(min, max),
    }
}

/// Histogram buckets in display order. Bounds are contiguous so every
/// non-negative price lands in exactly one bucket; integer prices match
/// the inclusive labels.
pub const PRICE_BUCKETS: [PriceBucket; 10] = [
    bucket("0-100", 0.0, Some(101.0)),
    bucket("101-200", 101.0, Some(201.0)),
    bucket("201-300", 201.0, Some(301.0)),
    bucket("301-400", 301.0, Some(401.0)),
    bucket("401-500", 401.0, Some(501.0)),
    bucket("501-600", 501.0, Some(601.0)),
    bucket("601-700", 601.0, Some(701.0)),
    bucket("701-800", 701.0, Some(801.0)),
    bucket("801-900", 801.0, Some(901.0)),
    bucket("901-above", 901.0, None),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket_for(price: f64) -> Option<&'static PriceBucket> {
        PRICE_BUCKETS.iter().find(|bucket| bucket.range.contains(price))
    }

    #[test]
    fn test_buckets_are_contiguous() {
        assert_eq!(PRICE_BUCKETS[0].range.min, 0.0);
        for pair in PRICE_BUCKETS.windows(2) {
            assert_eq!(pair[0].range.max, Some(pair[1].range.min));
        }
        assert_eq!(PRICE_BUCKETS[9].range.max, None);
    }

    #[test]
    fn test_bucket_for_edges() {
        assert_eq!(bucket_for(0.0).unwrap().label, "0-100");
        assert_eq!(bucket_for(100.0).unwrap().label, "0-100");
        assert_eq!(bucket_for(100.5).unwrap().label, "0-100");
        assert_eq!(bucket_for(101.0).unwrap().label, "101-200");
        assert_eq!(bucket_for(900.99).unwrap().label, "801-900");
        assert_eq!(bucket_for(901.0).unwrap().label, "901-above");
        assert_eq!(bucket_for(1_000_000.0).unwrap().label, "901-above");
        assert!(bucket_for(-1.0).is_none());
    }
}
