use std::hash::Hash;

use am_types::round_to;
use indexmap::IndexMap;

/// Scales `amounts` to fractions of their total, rounded to `places`.
///
/// The rounding residual is folded into the largest entry so the result
/// still sums to one. `None` when the total is not positive.
pub fn normalize_ratios<K>(amounts: &IndexMap<K, f64>, places: i32) -> Option<IndexMap<K, f64>>
where
    K: Hash + Eq + Clone,
{
    let total: f64 = amounts.values().sum();
    if total <= 0.0 {
        return None;
    }

    let mut ratios: IndexMap<K, f64> = amounts
        .iter()
        .map(|(key, amount)| (key.clone(), round_to(amount / total, places)))
        .collect();

    let residual = 1.0 - ratios.values().sum::<f64>();
    if residual != 0.0 {
        let mut largest: Option<(&K, f64)> = None;
        for (key, ratio) in &ratios {
            if largest.map_or(true, |(_, best)| *ratio > best) {
                largest = Some((key, *ratio));
            }
        }
        if let Some((key, _)) = largest {
            let key = key.clone();
            if let Some(ratio) = ratios.get_mut(&key) {
                *ratio = round_to(*ratio + residual, places);
            }
        }
    }

    Some(ratios)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_simple_split() {
        let mut amounts = IndexMap::new();
        amounts.insert("code", 300.0);
        amounts.insert("test", 100.0);
        let ratios = normalize_ratios(&amounts, 5).unwrap();
        assert_eq!(ratios["code"], 0.75);
        assert_eq!(ratios["test"], 0.25);
    }

    #[test]
    fn test_residual_goes_to_largest() {
        let mut amounts = IndexMap::new();
        amounts.insert("a", 1.0);
        amounts.insert("b", 1.0);
        amounts.insert("c", 1.0);
        let ratios = normalize_ratios(&amounts, 4).unwrap();
        let sum: f64 = ratios.values().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert_eq!(ratios["b"], 0.3333);
        assert_eq!(ratios["c"], 0.3333);
        assert_eq!(ratios["a"], 0.3334);
    }

    #[test]
    fn test_zero_total_is_none() {
        let mut amounts = IndexMap::new();
        amounts.insert("a", 0.0);
        assert!(normalize_ratios(&amounts, 4).is_none());
        assert!(normalize_ratios(&IndexMap::<&str, f64>::new(), 4).is_none());
    }
}
