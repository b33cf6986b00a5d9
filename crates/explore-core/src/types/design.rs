//! Design tables: experiments as rows, scope factors as columns.

use serde::{Deserialize, Serialize};

use super::scope::Scope;
use super::value::{FactorKind, FactorValue};

/// Experiment identifier, unique within a (scope, design) pair.
pub type ExperimentId = i64;

/// A typed design column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: FactorKind,
}

/// One experiment: an identifier plus one value per design column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub id: ExperimentId,
    pub values: Vec<FactorValue>,
}

/// A table of experiments for one scope and design name.
///
/// Cloning yields an independent copy; the generator hands one copy to the
/// store and returns another to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    pub scope_name: String,
    pub design_name: String,
    /// Sampler that produced the rows.
    pub sampler: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Experiment>,
}

impl Design {
    /// An empty design whose columns follow the scope's declaration order.
    pub fn for_scope(scope: &Scope, design_name: impl Into<String>, sampler: impl Into<String>) -> Self {
        let columns = scope
            .factors()
            .iter()
            .map(|f| Column {
                name: f.name.clone(),
                kind: f.kind,
            })
            .collect();
        Self {
            scope_name: scope.name().to_string(),
            design_name: design_name.into(),
            sampler: sampler.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// An empty design with no columns, returned by stores for pairs that
    /// were never written.
    pub fn empty(scope_name: impl Into<String>, design_name: impl Into<String>) -> Self {
        let design_name = design_name.into();
        Self {
            scope_name: scope_name.into(),
            sampler: design_name.clone(),
            design_name,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// All values of one column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&FactorValue>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| &r.values[idx]).collect())
    }

    /// Numeric view of a column; `None` if the column is missing or categorical.
    pub fn column_f64(&self, name: &str) -> Option<Vec<f64>> {
        self.column(name)?.into_iter().map(FactorValue::as_f64).collect()
    }

    pub fn row(&self, index: usize) -> Option<&Experiment> {
        self.rows.get(index)
    }

    pub fn experiment_ids(&self) -> Vec<ExperimentId> {
        self.rows.iter().map(|r| r.id).collect()
    }

    /// Append a row and return its id, the next 0-based position.
    pub fn push_row(&mut self, values: Vec<FactorValue>) -> ExperimentId {
        debug_assert_eq!(values.len(), self.columns.len());
        let id = self.rows.len() as ExperimentId;
        self.rows.push(Experiment { id, values });
        id
    }

    /// Replace row ids positionally, e.g. with ids assigned by a store.
    /// Returns false and leaves the design untouched on a length mismatch.
    pub fn assign_ids(&mut self, ids: &[ExperimentId]) -> bool {
        if ids.len() != self.rows.len() {
            return false;
        }
        for (row, id) in self.rows.iter_mut().zip(ids) {
            row.id = *id;
        }
        true
    }

    /// A copy restricted to the named columns, in the given order.
    /// Returns `None` if any column is missing.
    pub fn project(&self, names: &[&str]) -> Option<Design> {
        let indices: Vec<usize> = names
            .iter()
            .map(|n| self.column_index(n))
            .collect::<Option<_>>()?;
        Some(Design {
            scope_name: self.scope_name.clone(),
            design_name: self.design_name.clone(),
            sampler: self.sampler.clone(),
            columns: indices.iter().map(|&i| self.columns[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|r| Experiment {
                    id: r.id,
                    values: indices.iter().map(|&i| r.values[i].clone()).collect(),
                })
                .collect(),
        })
    }
}
