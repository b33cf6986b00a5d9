//! One-factor-at-a-time sensitivity design.
//!
//! Row 0 holds every factor at its default. Then, in declaration order,
//! each non-degenerate factor contributes one row per distinct non-default
//! bound (lower before upper), with every other factor at its default.

use explore_core::{FactorValue, Scope};

pub fn generate(scope: &Scope) -> Vec<Vec<FactorValue>> {
    let baseline: Vec<FactorValue> = scope.factors().iter().map(|f| f.default.clone()).collect();
    let mut rows = Vec::with_capacity(row_count(scope));
    rows.push(baseline.clone());

    for (j, factor) in scope.factors().iter().enumerate() {
        for value in factor.perturbation_values() {
            let mut row = baseline.clone();
            row[j] = value;
            rows.push(row);
        }
    }

    tracing::debug!(rows = rows.len(), "one-at-a-time design built");
    rows
}

/// `1 + Σ distinct non-default bounds` over non-degenerate factors.
pub fn row_count(scope: &Scope) -> usize {
    1 + scope
        .factors()
        .iter()
        .map(|f| f.perturbation_values().len())
        .sum::<usize>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use explore_core::{Distribution, Factor};

    #[test]
    fn test_baseline_only_for_constants() {
        let scope = Scope::builder("c")
            .constant(Factor::constant("a", 1.0))
            .constant(Factor::constant("b", true))
            .build()
            .unwrap();
        let rows = generate(&scope);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], vec![FactorValue::Real(1.0), FactorValue::Boolean(true)]);
    }

    #[test]
    fn test_interior_default_gives_two_rows() {
        let scope = Scope::builder("u")
            .uncertainty(Factor::continuous(
                "x",
                Distribution::Uniform { min: 0.0, max: 10.0 },
                5.0,
            ))
            .build()
            .unwrap();
        let rows = generate(&scope);
        assert_eq!(
            rows,
            vec![
                vec![FactorValue::Real(5.0)],
                vec![FactorValue::Real(0.0)],
                vec![FactorValue::Real(10.0)],
            ]
        );
        assert_eq!(row_count(&scope), 3);
    }
}
