//! Unit-interval to native-domain transforms.
//!
//! Every non-degenerate distribution maps a draw `u` in `[0, 1)` through
//! its inverse CDF (or an equivalent step function for discrete domains).
//! Degenerate factors ignore `u` and return their default.

pub mod continuous;
pub mod discrete;

use explore_core::errors::DesignError;
use explore_core::{Distribution, Factor, FactorValue};

/// Map a unit draw to the native value of `factor`.
pub fn to_native(factor: &Factor, u: f64) -> Result<FactorValue, DesignError> {
    if factor.is_degenerate() {
        return Ok(factor.default.clone());
    }
    if !(0.0..=1.0).contains(&u) {
        return Err(DesignError::Transform {
            factor: factor.name.clone(),
            message: format!("unit draw {u} outside [0, 1]"),
        });
    }

    let value = match &factor.distribution {
        Distribution::Uniform { min, max } => FactorValue::Real(continuous::uniform(*min, *max, u)),
        Distribution::Triangular { min, mode, max } => {
            FactorValue::Real(continuous::triangular(*min, *mode, *max, u))
        }
        Distribution::Pert {
            min,
            mode,
            max,
            gamma,
        } => {
            let x = continuous::pert(*min, *mode, *max, *gamma, u).map_err(|message| {
                DesignError::Transform {
                    factor: factor.name.clone(),
                    message,
                }
            })?;
            FactorValue::Real(x)
        }
        Distribution::DiscreteUniform { min, max } => {
            FactorValue::Integer(discrete::discrete_uniform(*min, *max, u))
        }
        Distribution::BinaryChoice => FactorValue::Boolean(discrete::binary(u)),
        Distribution::Categorical { levels } => {
            let idx = discrete::level_index(levels.len(), u);
            FactorValue::Category(levels[idx].clone())
        }
        Distribution::Constant => factor.default.clone(),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_ignores_draw() {
        let f = Factor::constant("risk", 1.0);
        assert_eq!(to_native(&f, 0.9).unwrap(), FactorValue::Real(1.0));
    }

    #[test]
    fn test_out_of_range_draw_rejected() {
        let f = Factor::boolean("b", false);
        assert!(matches!(
            to_native(&f, 1.5),
            Err(DesignError::Transform { .. })
        ));
        assert!(to_native(&f, f64::NAN).is_err());
    }

    #[test]
    fn test_categorical_covers_all_levels() {
        let f = Factor::categorical("mode", ["bus", "rail", "ferry"], "bus");
        let picked: Vec<_> = [0.0, 0.4, 0.99]
            .iter()
            .map(|&u| to_native(&f, u).unwrap())
            .collect();
        assert_eq!(
            picked,
            vec![
                FactorValue::from("bus"),
                FactorValue::from("rail"),
                FactorValue::from("ferry")
            ]
        );
    }
}
