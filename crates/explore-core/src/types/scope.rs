//! Scope: the ordered, immutable set of factors and measures of a model.

use serde::{Deserialize, Serialize};

use super::factor::{Factor, FactorRole};
use crate::errors::ScopeError;

/// An exploratory-modeling scope.
///
/// Declaration order is meaningful: it fixes the column order of every
/// design and the iteration order of the one-at-a-time sampler. A `Scope`
/// is validated on construction and offers no mutable access afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScope")]
pub struct Scope {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    factors: Vec<Factor>,
    measures: Vec<String>,
}

/// Unvalidated wire form, validated through `TryFrom`.
#[derive(Deserialize)]
struct RawScope {
    name: String,
    #[serde(default)]
    description: Option<String>,
    factors: Vec<Factor>,
    #[serde(default)]
    measures: Vec<String>,
}

impl TryFrom<RawScope> for Scope {
    type Error = ScopeError;

    fn try_from(raw: RawScope) -> Result<Self, Self::Error> {
        Scope::validated(raw.name, raw.description, raw.factors, raw.measures)
    }
}

impl Scope {
    pub fn builder(name: impl Into<String>) -> ScopeBuilder {
        ScopeBuilder::new(name)
    }

    fn validated(
        name: String,
        description: Option<String>,
        factors: Vec<Factor>,
        measures: Vec<String>,
    ) -> Result<Self, ScopeError> {
        if name.trim().is_empty() {
            return Err(ScopeError::InvalidName("scope name must not be empty".into()));
        }
        if factors.is_empty() {
            return Err(ScopeError::EmptyScope(name));
        }
        for (i, factor) in factors.iter().enumerate() {
            factor.validate()?;
            if factors[..i].iter().any(|f| f.name == factor.name) {
                return Err(ScopeError::DuplicateFactor {
                    name: factor.name.clone(),
                });
            }
        }
        for (i, measure) in measures.iter().enumerate() {
            if measure.trim().is_empty() {
                return Err(ScopeError::InvalidName("measure name must not be empty".into()));
            }
            if measures[..i].contains(measure) {
                return Err(ScopeError::InvalidName(format!("duplicate measure '{measure}'")));
            }
        }
        Ok(Self {
            name,
            description,
            factors,
            measures,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// All factors in declaration order.
    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    pub fn factor(&self, name: &str) -> Option<&Factor> {
        self.factors.iter().find(|f| f.name == name)
    }

    pub fn factor_names(&self) -> Vec<&str> {
        self.factors.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn uncertainties(&self) -> impl Iterator<Item = &Factor> {
        self.with_role(FactorRole::Uncertainty)
    }

    pub fn levers(&self) -> impl Iterator<Item = &Factor> {
        self.with_role(FactorRole::Lever)
    }

    pub fn constants(&self) -> impl Iterator<Item = &Factor> {
        self.with_role(FactorRole::Constant)
    }

    fn with_role(&self, role: FactorRole) -> impl Iterator<Item = &Factor> {
        self.factors.iter().filter(move |f| f.role == role)
    }

    /// Performance measure names.
    pub fn measures(&self) -> &[String] {
        &self.measures
    }

    /// Number of factors that drive sample density: uncertainties plus
    /// constant risk factors. Levers are excluded.
    pub fn n_sample_factors(&self) -> usize {
        self.factors
            .iter()
            .filter(|f| matches!(f.role, FactorRole::Uncertainty | FactorRole::Constant))
            .count()
    }

    /// Canonical JSON form, used as the stored metadata of the scope.
    pub fn to_json(&self) -> Result<String, ScopeError> {
        serde_json::to_string(self).map_err(|e| ScopeError::Parse(e.to_string()))
    }

    /// Parse and validate a scope from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, ScopeError> {
        serde_json::from_str(json).map_err(|e| ScopeError::Parse(e.to_string()))
    }
}

/// Builder for [`Scope`]. The role of each factor is set by the method
/// used to add it.
#[derive(Debug, Clone)]
pub struct ScopeBuilder {
    name: String,
    description: Option<String>,
    factors: Vec<Factor>,
    measures: Vec<String>,
}

impl ScopeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            factors: Vec::new(),
            measures: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn uncertainty(self, factor: Factor) -> Self {
        self.push(factor, FactorRole::Uncertainty)
    }

    pub fn lever(self, factor: Factor) -> Self {
        self.push(factor, FactorRole::Lever)
    }

    pub fn constant(self, factor: Factor) -> Self {
        self.push(factor, FactorRole::Constant)
    }

    pub fn measure(mut self, name: impl Into<String>) -> Self {
        self.measures.push(name.into());
        self
    }

    fn push(mut self, mut factor: Factor, role: FactorRole) -> Self {
        factor.role = role;
        self.factors.push(factor);
        self
    }

    pub fn build(self) -> Result<Scope, ScopeError> {
        Scope::validated(self.name, self.description, self.factors, self.measures)
    }
}
