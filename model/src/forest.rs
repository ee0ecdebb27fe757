use ndarray::{Array1, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::{ModelErr, Regressor, Result, regressor::check_width};

/// Marks a missing child in the node arrays.
pub const LEAF: i64 = -1;

/// A regression tree stored as parallel node arrays.
///
/// Node `i` is a leaf when `children_left[i] == LEAF`, in which case `value[i]` is its
/// prediction. Otherwise a sample goes to `children_left[i]` when
/// `x[feature[i]] <= threshold[i]` and to `children_right[i]` when not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    value: Vec<f64>,
}

impl RegressionTree {
    /// Creates a new `RegressionTree` from its node arrays.
    ///
    /// # Returns
    /// The tree, or an error if the arrays do not describe a well formed tree over
    /// `n_features` features.
    pub fn new(
        children_left: Vec<i64>,
        children_right: Vec<i64>,
        feature: Vec<i64>,
        threshold: Vec<f64>,
        value: Vec<f64>,
        n_features: usize,
    ) -> Result<Self> {
        let tree = Self {
            children_left,
            children_right,
            feature,
            threshold,
            value,
        };
        tree.validate(n_features)?;
        Ok(tree)
    }

    /// Checks every structural invariant the traversal in `predict_row` relies on.
    ///
    /// Children must point strictly forward, which rules out cycles and guarantees that every
    /// traversal ends in a leaf.
    pub(crate) fn validate(&self, n_features: usize) -> Result<()> {
        let n = self.value.len();
        if n == 0 {
            return Err(ModelErr::InvalidArtifact("tree has no nodes".into()));
        }

        for (what, len) in [
            ("children_right", self.children_right.len()),
            ("children_left", self.children_left.len()),
            ("feature", self.feature.len()),
            ("threshold", self.threshold.len()),
        ] {
            if len != n {
                return Err(ModelErr::ShapeMismatch {
                    what,
                    got: len,
                    expected: n,
                });
            }
        }

        for i in 0..n {
            let (left, right) = (self.children_left[i], self.children_right[i]);

            if left == LEAF {
                if right != LEAF {
                    return Err(ModelErr::InvalidArtifact(format!(
                        "node {i} has a right child but no left child"
                    )));
                }
                if !self.value[i].is_finite() {
                    return Err(ModelErr::InvalidArtifact(format!(
                        "leaf {i} has a non finite value"
                    )));
                }
                continue;
            }

            for child in [left, right] {
                if child <= i as i64 || child >= n as i64 {
                    return Err(ModelErr::InvalidArtifact(format!(
                        "node {i} points to invalid child {child}"
                    )));
                }
            }

            let feature = self.feature[i];
            if feature < 0 || feature >= n_features as i64 {
                return Err(ModelErr::InvalidArtifact(format!(
                    "node {i} splits on feature {feature} but the model has {n_features} features"
                )));
            }

            if !self.threshold[i].is_finite() {
                return Err(ModelErr::InvalidArtifact(format!(
                    "node {i} has a non finite threshold"
                )));
            }
        }

        Ok(())
    }

    /// Walks the tree from the root for a single sample.
    fn predict_row(&self, row: ArrayView1<f64>) -> f64 {
        let mut node = 0;

        while self.children_left[node] != LEAF {
            let feature = self.feature[node] as usize;
            node = if row[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }

        self.value[node]
    }
}

/// An ensemble of regression trees whose prediction is the mean of its members.
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<RegressionTree>,
    n_features: usize,
}

impl RandomForest {
    /// Creates a new `RandomForest`.
    ///
    /// # Arguments
    /// * `trees` - The members of the ensemble.
    /// * `n_features` - The width of the input rows.
    ///
    /// # Returns
    /// A new `RandomForest` or an error if there are no trees or any of them is malformed.
    pub fn new(trees: Vec<RegressionTree>, n_features: usize) -> Result<Self> {
        if trees.is_empty() {
            return Err(ModelErr::InvalidArtifact(
                "random forest must have at least one tree".into(),
            ));
        }

        for (i, tree) in trees.iter().enumerate() {
            tree.validate(n_features)
                .map_err(|e| ModelErr::InvalidArtifact(format!("tree {i}: {e}")))?;
        }

        Ok(Self { trees, n_features })
    }

    /// Returns the amount of trees in the ensemble.
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl Regressor for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        check_width(&x, self.n_features)?;

        let ntrees = self.trees.len() as f64;
        let y = x
            .axis_iter(Axis(0))
            .map(|row| {
                let total: f64 = self.trees.iter().map(|tree| tree.predict_row(row)).sum();
                total / ntrees
            })
            .collect();

        Ok(y)
    }
}
