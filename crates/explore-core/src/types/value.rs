//! Native-domain factor values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The value domain of a factor. Fixes the column type in a design table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    Continuous,
    Integer,
    Boolean,
    Categorical,
}

impl FactorKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Continuous => "continuous",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Categorical => "categorical",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "continuous" => Some(Self::Continuous),
            "integer" => Some(Self::Integer),
            "boolean" => Some(Self::Boolean),
            "categorical" => Some(Self::Categorical),
            _ => None,
        }
    }
}

impl fmt::Display for FactorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single cell of a design table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorValue {
    Real(f64),
    Integer(i64),
    Boolean(bool),
    Category(String),
}

impl FactorValue {
    pub fn kind(&self) -> FactorKind {
        match self {
            Self::Real(_) => FactorKind::Continuous,
            Self::Integer(_) => FactorKind::Integer,
            Self::Boolean(_) => FactorKind::Boolean,
            Self::Category(_) => FactorKind::Categorical,
        }
    }

    /// Numeric view used for summary statistics. Booleans map to 0/1,
    /// categories have no numeric view.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Real(v) => Some(*v),
            Self::Integer(v) => Some(*v as f64),
            Self::Boolean(v) => Some(if *v { 1.0 } else { 0.0 }),
            Self::Category(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Category(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for FactorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Category(v) => f.write_str(v),
        }
    }
}

impl From<f64> for FactorValue {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<i64> for FactorValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for FactorValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for FactorValue {
    fn from(v: &str) -> Self {
        Self::Category(v.to_string())
    }
}
