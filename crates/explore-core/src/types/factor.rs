//! Factor model: one uncertainty, lever or constant with its distribution.

use serde::{Deserialize, Serialize};

use super::value::{FactorKind, FactorValue};
use crate::constants::DEFAULT_PERT_GAMMA;
use crate::errors::ScopeError;

/// How a factor participates in exploratory modeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorRole {
    /// Exogenous uncertainty, always sampled.
    Uncertainty,
    /// Policy lever under the decision maker's control.
    Lever,
    /// Risk factor held at its default. Counted among sampled factors.
    Constant,
}

impl FactorRole {
    pub fn name(self) -> &'static str {
        match self {
            Self::Uncertainty => "uncertainty",
            Self::Lever => "lever",
            Self::Constant => "constant",
        }
    }
}

fn default_pert_gamma() -> f64 {
    DEFAULT_PERT_GAMMA
}

/// Sampling distribution of a factor, carrying the parameters needed to
/// map a unit-interval draw into the native domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Distribution {
    Uniform {
        min: f64,
        max: f64,
    },
    Triangular {
        min: f64,
        mode: f64,
        max: f64,
    },
    /// Beta-PERT. `gamma` weights the mode; 4 gives the classic PERT.
    Pert {
        min: f64,
        mode: f64,
        max: f64,
        #[serde(default = "default_pert_gamma")]
        gamma: f64,
    },
    DiscreteUniform {
        min: i64,
        max: i64,
    },
    /// Degenerate: every draw is the factor's default.
    Constant,
    /// Boolean coin flip.
    BinaryChoice,
    Categorical {
        levels: Vec<String>,
    },
}

impl Distribution {
    /// Classic PERT with `gamma = 4`.
    pub fn pert(min: f64, mode: f64, max: f64) -> Self {
        Self::Pert {
            min,
            mode,
            max,
            gamma: DEFAULT_PERT_GAMMA,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Constant)
    }

    /// Analytical mean, when the distribution has a numeric one.
    pub fn mean(&self) -> Option<f64> {
        match self {
            Self::Uniform { min, max } => Some((min + max) / 2.0),
            Self::Triangular { min, mode, max } => Some((min + mode + max) / 3.0),
            Self::Pert {
                min,
                mode,
                max,
                gamma,
            } => Some((min + gamma * mode + max) / (gamma + 2.0)),
            Self::DiscreteUniform { min, max } => Some((*min as f64 + *max as f64) / 2.0),
            Self::BinaryChoice => Some(0.5),
            Self::Constant | Self::Categorical { .. } => None,
        }
    }

    /// Kinds of factor this distribution can drive.
    fn supports(&self, kind: FactorKind) -> bool {
        match self {
            Self::Uniform { .. } | Self::Triangular { .. } | Self::Pert { .. } => {
                kind == FactorKind::Continuous
            }
            Self::DiscreteUniform { .. } => kind == FactorKind::Integer,
            Self::BinaryChoice => kind == FactorKind::Boolean,
            Self::Categorical { .. } => kind == FactorKind::Categorical,
            Self::Constant => true,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Self::Uniform { .. } => "uniform",
            Self::Triangular { .. } => "triangular",
            Self::Pert { .. } => "pert",
            Self::DiscreteUniform { .. } => "discrete_uniform",
            Self::Constant => "constant",
            Self::BinaryChoice => "binary_choice",
            Self::Categorical { .. } => "categorical",
        }
    }
}

/// One uncertain, lever or constant factor of a scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub name: String,
    pub kind: FactorKind,
    pub role: FactorRole,
    pub distribution: Distribution,
    /// Baseline value, used by `uni` and by constants.
    pub default: FactorValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Factor {
    /// A continuous uncertainty with the given distribution.
    pub fn continuous(name: impl Into<String>, distribution: Distribution, default: f64) -> Self {
        Self::new(name, FactorKind::Continuous, distribution, FactorValue::Real(default))
    }

    /// An integer uncertainty, uniform over `min..=max`.
    pub fn integer(name: impl Into<String>, min: i64, max: i64, default: i64) -> Self {
        Self::new(
            name,
            FactorKind::Integer,
            Distribution::DiscreteUniform { min, max },
            FactorValue::Integer(default),
        )
    }

    pub fn boolean(name: impl Into<String>, default: bool) -> Self {
        Self::new(
            name,
            FactorKind::Boolean,
            Distribution::BinaryChoice,
            FactorValue::Boolean(default),
        )
    }

    pub fn categorical<S: Into<String>>(
        name: impl Into<String>,
        levels: impl IntoIterator<Item = S>,
        default: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            FactorKind::Categorical,
            Distribution::Categorical {
                levels: levels.into_iter().map(Into::into).collect(),
            },
            FactorValue::Category(default.into()),
        )
    }

    /// A degenerate risk factor fixed at `value`.
    pub fn constant(name: impl Into<String>, value: impl Into<FactorValue>) -> Self {
        let value = value.into();
        let mut factor = Self::new(name, value.kind(), Distribution::Constant, value);
        factor.role = FactorRole::Constant;
        factor
    }

    fn new(
        name: impl Into<String>,
        kind: FactorKind,
        distribution: Distribution,
        default: FactorValue,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            role: FactorRole::Uncertainty,
            distribution,
            default,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// True when every draw of this factor is its default.
    pub fn is_degenerate(&self) -> bool {
        self.role == FactorRole::Constant || self.distribution.is_degenerate()
    }

    /// Check kind/distribution compatibility, parameter ordering and that
    /// the default lies in the support.
    pub fn validate(&self) -> Result<(), ScopeError> {
        if self.name.trim().is_empty() {
            return Err(ScopeError::InvalidName("factor name must not be empty".into()));
        }
        let name = self.name.as_str();

        if !self.distribution.supports(self.kind) {
            return Err(ScopeError::distribution(
                name,
                format!(
                    "{} distribution cannot drive a {} factor",
                    self.distribution.type_name(),
                    self.kind
                ),
            ));
        }
        if self.default.kind() != self.kind {
            return Err(ScopeError::distribution(
                name,
                format!("default {} is not a {} value", self.default, self.kind),
            ));
        }
        if self.role == FactorRole::Constant && !self.distribution.is_degenerate() {
            return Err(ScopeError::distribution(
                name,
                "constant factors must use the constant distribution",
            ));
        }

        match &self.distribution {
            Distribution::Uniform { min, max } => {
                check_bounds(name, *min, *max)?;
                self.check_real_default(*min, *max)
            }
            Distribution::Triangular { min, mode, max } => {
                check_bounds(name, *min, *max)?;
                check_mode(name, *min, *mode, *max)?;
                self.check_real_default(*min, *max)
            }
            Distribution::Pert {
                min,
                mode,
                max,
                gamma,
            } => {
                check_bounds(name, *min, *max)?;
                check_mode(name, *min, *mode, *max)?;
                if !gamma.is_finite() || *gamma <= 0.0 {
                    return Err(ScopeError::distribution(name, "pert gamma must be positive"));
                }
                self.check_real_default(*min, *max)
            }
            Distribution::DiscreteUniform { min, max } => {
                if min > max {
                    return Err(ScopeError::distribution(
                        name,
                        format!("min {min} is greater than max {max}"),
                    ));
                }
                match self.default {
                    FactorValue::Integer(d) if (*min..=*max).contains(&d) => Ok(()),
                    _ => Err(self.default_outside_support()),
                }
            }
            Distribution::Categorical { levels } => {
                if levels.is_empty() {
                    return Err(ScopeError::distribution(name, "no categorical levels"));
                }
                for (i, level) in levels.iter().enumerate() {
                    if levels[..i].contains(level) {
                        return Err(ScopeError::distribution(
                            name,
                            format!("duplicate level '{level}'"),
                        ));
                    }
                }
                match &self.default {
                    FactorValue::Category(d) if levels.contains(d) => Ok(()),
                    _ => Err(self.default_outside_support()),
                }
            }
            Distribution::BinaryChoice | Distribution::Constant => {
                if let FactorValue::Real(d) = self.default {
                    if !d.is_finite() {
                        return Err(self.default_outside_support());
                    }
                }
                Ok(())
            }
        }
    }

    /// Distinct non-default bound values, lower bound first. These are the
    /// one-at-a-time perturbations of this factor; degenerate factors have none.
    pub fn perturbation_values(&self) -> Vec<FactorValue> {
        if self.is_degenerate() {
            return Vec::new();
        }
        let candidates = match &self.distribution {
            Distribution::Uniform { min, max }
            | Distribution::Triangular { min, max, .. }
            | Distribution::Pert { min, max, .. } => {
                vec![FactorValue::Real(*min), FactorValue::Real(*max)]
            }
            Distribution::DiscreteUniform { min, max } => {
                vec![FactorValue::Integer(*min), FactorValue::Integer(*max)]
            }
            Distribution::BinaryChoice => match self.default {
                FactorValue::Boolean(d) => vec![FactorValue::Boolean(!d)],
                _ => Vec::new(),
            },
            Distribution::Categorical { levels } => levels
                .first()
                .into_iter()
                .chain(levels.last())
                .map(|l| FactorValue::Category(l.clone()))
                .collect(),
            Distribution::Constant => Vec::new(),
        };

        let mut values: Vec<FactorValue> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if candidate != self.default && !values.contains(&candidate) {
                values.push(candidate);
            }
        }
        values
    }

    fn check_real_default(&self, min: f64, max: f64) -> Result<(), ScopeError> {
        match self.default {
            FactorValue::Real(d) if d >= min && d <= max => Ok(()),
            _ => Err(self.default_outside_support()),
        }
    }

    fn default_outside_support(&self) -> ScopeError {
        ScopeError::distribution(
            &self.name,
            format!("default {} lies outside the distribution support", self.default),
        )
    }
}

fn check_bounds(name: &str, min: f64, max: f64) -> Result<(), ScopeError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(ScopeError::distribution(name, "bounds must be finite"));
    }
    if min >= max {
        return Err(ScopeError::distribution(
            name,
            format!("min {min} must be less than max {max}"),
        ));
    }
    Ok(())
}

fn check_mode(name: &str, min: f64, mode: f64, max: f64) -> Result<(), ScopeError> {
    if !(min..=max).contains(&mode) {
        return Err(ScopeError::distribution(
            name,
            format!("mode {mode} lies outside [{min}, {max}]"),
        ));
    }
    Ok(())
}
