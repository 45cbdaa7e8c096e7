use lmc_core::Value;
use lmc_dist::flip::score_flip;
use lmc_dist::geometric::score_geometric;
use lmc_dist::uniform::score_int;
use lmc_dist::BinomialPmf;
use proptest::prelude::*;

proptest! {
    #[test]
    fn flip_mass_sums_to_one(p in 0.0f64..=1.0) {
        let total = score_flip(p, &Value::Bool(true)) + score_flip(p, &Value::Bool(false));
        prop_assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn integer_mass_sums_to_one(low in -50i64..50, width in 1i64..40) {
        let high = low + width;
        let total: f64 = (low - 2..high + 2).map(|v| score_int(low, high, &Value::Int(v))).sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn binomial_mass_sums_to_one(n in 0u64..30, p in 0.01f64..0.99) {
        let table = BinomialPmf::new(8);
        let total: f64 = (0..=n + 1).map(|k| table.pmf(n, k, p)).sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
        prop_assert!(table.len() <= table.capacity());
    }

    #[test]
    fn geometric_scores_decrease(p in 0.05f64..0.95, n in 1i64..40) {
        let here = score_geometric(p, &Value::Int(n));
        let next = score_geometric(p, &Value::Int(n + 1));
        prop_assert!(next <= here);
    }
}
