// Metric formulas
//
// Each metric is an independent pure function over (amount, &DataStore)
// producing one or more displayed quantities. All of them run on every
// recomputation and the order does not matter. Division by a zero or
// missing constant yields Infinity/NaN, which flows to the display
// unguarded.

use crate::store::DataStore;
use std::f64::consts::PI;

/// Density of gold, g/cm³.
const GOLD_DENSITY: f64 = 19.32;

/// Acres per square centimeter (coin-footprint conversion).
const ACRES_PER_SQ_CM: f64 = 2.4711e-8;

/// Display key for every animated quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    GoldWeight,
    GoldVolume,
    GoldDiameter,
    CoinWeight,
    CoinHeight,
    CoinArea,
    DiamondCarats,
    SavingsRatio,
    IncomeMonths,
    ColZurich,
    ColNewYork,
    ColLondon,
    ColLisbon,
    ColBangkok,
    UnitCount,
}

/// Cost-of-living baselines, one store key per region.
pub const REGIONS: [(Metric, &str); 5] = [
    (Metric::ColZurich, "col_zurich"),
    (Metric::ColNewYork, "col_new_york"),
    (Metric::ColLondon, "col_london"),
    (Metric::ColLisbon, "col_lisbon"),
    (Metric::ColBangkok, "col_bangkok"),
];

impl Metric {
    pub const ALL: [Metric; 15] = [
        Metric::GoldWeight,
        Metric::GoldVolume,
        Metric::GoldDiameter,
        Metric::CoinWeight,
        Metric::CoinHeight,
        Metric::CoinArea,
        Metric::DiamondCarats,
        Metric::SavingsRatio,
        Metric::IncomeMonths,
        Metric::ColZurich,
        Metric::ColNewYork,
        Metric::ColLondon,
        Metric::ColLisbon,
        Metric::ColBangkok,
        Metric::UnitCount,
    ];

    /// Fixed fractional-digit count for this metric's display.
    pub fn decimals(self) -> usize {
        match self {
            Metric::ColZurich
            | Metric::ColNewYork
            | Metric::ColLondon
            | Metric::ColLisbon
            | Metric::ColBangkok
            | Metric::UnitCount => 0,
            _ => 3,
        }
    }

    /// Row label for the metric panel.
    pub fn label(self) -> &'static str {
        match self {
            Metric::GoldWeight => "Gold weight",
            Metric::GoldVolume => "Gold melt volume",
            Metric::GoldDiameter => "Gold sphere diameter",
            Metric::CoinWeight => "Coin stack weight",
            Metric::CoinHeight => "Coin stack height",
            Metric::CoinArea => "Coin carpet area",
            Metric::DiamondCarats => "Diamond",
            Metric::SavingsRatio => "Household savings",
            Metric::IncomeMonths => "Monthly incomes",
            Metric::ColZurich => "Zurich",
            Metric::ColNewYork => "New York",
            Metric::ColLondon => "London",
            Metric::ColLisbon => "Lisbon",
            Metric::ColBangkok => "Bangkok",
            Metric::UnitCount => "Cups of coffee",
        }
    }

    /// Unit suffix for the metric panel.
    pub fn unit(self) -> &'static str {
        match self {
            Metric::GoldWeight => "g",
            Metric::GoldVolume => "cm³",
            Metric::GoldDiameter => "cm",
            Metric::CoinWeight => "kg",
            Metric::CoinHeight => "m",
            Metric::CoinArea => "acres",
            Metric::DiamondCarats => "ct",
            Metric::SavingsRatio => "households",
            Metric::IncomeMonths => "months",
            Metric::ColZurich
            | Metric::ColNewYork
            | Metric::ColLondon
            | Metric::ColLisbon
            | Metric::ColBangkok => "months",
            Metric::UnitCount => "cups",
        }
    }
}

/// One recomputed quantity headed for the animator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricUpdate {
    pub metric: Metric,
    pub value: f64,
}

fn push(out: &mut Vec<MetricUpdate>, metric: Metric, value: f64) {
    out.push(MetricUpdate { metric, value });
}

/// Equivalent gold: weight, melt volume, and the diameter of a sphere
/// of that volume.
fn gold(v: f64, data: &DataStore, out: &mut Vec<MetricUpdate>) {
    let weight = v / data.get("gold_price");
    let volume = weight / GOLD_DENSITY;
    let diameter = 2.0 * (3.0 * volume / (4.0 * PI)).cbrt();

    push(out, Metric::GoldWeight, weight);
    push(out, Metric::GoldVolume, volume);
    push(out, Metric::GoldDiameter, diameter);
}

/// Equivalent coins: stack weight (g -> kg), stack height (cm -> m),
/// and the footprint of the coins laid flat (cm² -> acres).
fn coins(v: f64, data: &DataStore, out: &mut Vec<MetricUpdate>) {
    let weight = v * data.get("coin_weight") / 1000.0;
    let height = v * data.get("coin_height") / 100.0;
    let radius = data.get("coin_diameter") / 2.0;
    let area = v * PI * radius * radius * ACRES_PER_SQ_CM;

    push(out, Metric::CoinWeight, weight);
    push(out, Metric::CoinHeight, height);
    push(out, Metric::CoinArea, area);
}

/// Equivalent diamond weight in carats.
fn diamond(v: f64, data: &DataStore, out: &mut Vec<MetricUpdate>) {
    push(out, Metric::DiamondCarats, v / data.get("diamond_carat"));
}

/// Household ratios: average savings multiples and months of income.
fn household(v: f64, data: &DataStore, out: &mut Vec<MetricUpdate>) {
    push(out, Metric::SavingsRatio, v / data.get("savings_baseline"));
    push(out, Metric::IncomeMonths, v / (data.get("annual_income") / 12.0));
}

/// Months of living expenses covered, per region.
fn cost_of_living(v: f64, data: &DataStore, out: &mut Vec<MetricUpdate>) {
    for (metric, key) in REGIONS {
        push(out, metric, v / data.get(key));
    }
}

/// How many reference units (cups of coffee) the amount buys.
fn units(v: f64, data: &DataStore, out: &mut Vec<MetricUpdate>) {
    push(out, Metric::UnitCount, v / data.get("unit_price"));
}

/// Run every metric function against the given amount.
pub fn compute_all(v: f64, data: &DataStore) -> Vec<MetricUpdate> {
    let mut out = Vec::with_capacity(Metric::ALL.len());
    gold(v, data, &mut out);
    coins(v, data, &mut out);
    diamond(v, data, &mut out);
    household(v, data, &mut out);
    cost_of_living(v, data, &mut out);
    units(v, data, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(json: &str) -> DataStore {
        DataStore::from_json(json).unwrap()
    }

    fn value_of(updates: &[MetricUpdate], metric: Metric) -> f64 {
        updates
            .iter()
            .find(|u| u.metric == metric)
            .map(|u| u.value)
            .unwrap()
    }

    #[test]
    fn test_gold_weight_is_amount_over_price() {
        let data = store(r#"{"gold_price": 60}"#);
        let updates = compute_all(60.0, &data);
        assert!((value_of(&updates, Metric::GoldWeight) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_gold_sphere_diameter() {
        // 1 g of gold: volume = 1/19.32 cm³, d = 2 * cbrt(3V / 4π)
        let data = store(r#"{"gold_price": 60}"#);
        let updates = compute_all(60.0, &data);
        let volume = 1.0 / GOLD_DENSITY;
        let expected = 2.0 * (3.0 * volume / (4.0 * PI)).cbrt();
        assert!((value_of(&updates, Metric::GoldDiameter) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_coin_outputs_are_linear_in_amount() {
        let data = store(r#"{"coin_weight": 8.5, "coin_height": 0.22, "coin_diameter": 2.575}"#);
        let single = compute_all(1000.0, &data);
        let double = compute_all(2000.0, &data);
        for metric in [Metric::CoinWeight, Metric::CoinHeight, Metric::CoinArea] {
            let ratio = value_of(&double, metric) / value_of(&single, metric);
            assert!((ratio - 2.0).abs() < 1e-9, "{metric:?} not linear");
        }
    }

    #[test]
    fn test_income_uses_monthly_baseline() {
        let data = store(r#"{"annual_income": 54000}"#);
        let updates = compute_all(4500.0, &data);
        assert!((value_of(&updates, Metric::IncomeMonths) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_division_by_zero_propagates_infinity() {
        let data = store(r#"{"unit_price": 0}"#);
        let updates = compute_all(100.0, &data);
        assert!(value_of(&updates, Metric::UnitCount).is_infinite());
    }

    #[test]
    fn test_empty_store_propagates_nan() {
        let data = DataStore::default();
        let updates = compute_all(100.0, &data);
        assert!(value_of(&updates, Metric::GoldWeight).is_nan());
        assert!(value_of(&updates, Metric::ColLondon).is_nan());
    }

    #[test]
    fn test_every_metric_is_computed_exactly_once() {
        let updates = compute_all(1500.0, &crate::store::DataStore::sample());
        assert_eq!(updates.len(), Metric::ALL.len());
        for metric in Metric::ALL {
            assert_eq!(
                updates.iter().filter(|u| u.metric == metric).count(),
                1,
                "{metric:?}"
            );
        }
    }
}
