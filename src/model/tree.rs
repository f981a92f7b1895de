//! CART regression tree

use super::{check_shapes, ModelError, Regressor};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Tree growth limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeParams {
    /// Nodes at this depth become leaves (root is depth 0)
    pub max_depth: usize,

    /// Minimum samples a node needs before it may split
    pub min_samples_split: usize,

    /// Minimum samples on each side of a split
    pub min_samples_leaf: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: 30,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

impl TreeParams {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.max_depth == 0 {
            return Err(ModelError::InvalidParameter(
                "max_depth must be > 0".to_string(),
            ));
        }
        if self.min_samples_split < 2 {
            return Err(ModelError::InvalidParameter(format!(
                "min_samples_split must be >= 2, got {}",
                self.min_samples_split
            )));
        }
        if self.min_samples_leaf == 0 {
            return Err(ModelError::InvalidParameter(
                "min_samples_leaf must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Flat tree node. Children always sit at higher indices than their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Leaf {
        value: f64,
        samples: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Regression tree minimising squared error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTreeRegressor {
    nodes: Vec<Node>,
    n_features: usize,
}

impl DecisionTreeRegressor {
    /// Fit on every row of `x`
    pub fn fit(x: &Array2<f64>, y: &Array1<f64>, params: &TreeParams) -> Result<Self, ModelError> {
        Self::fit_samples(x, y, (0..x.nrows()).collect(), params)
    }

    /// Fit on a multiset of row indices; bootstrap samples may repeat rows
    pub fn fit_samples(
        x: &Array2<f64>,
        y: &Array1<f64>,
        samples: Vec<usize>,
        params: &TreeParams,
    ) -> Result<Self, ModelError> {
        check_shapes(x, y)?;
        params.validate()?;
        if samples.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }

        let mut builder = TreeBuilder {
            x,
            y,
            params,
            nodes: Vec::new(),
        };
        builder.grow(samples, 0);

        Ok(Self {
            nodes: builder.nodes,
            n_features: x.ncols(),
        })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    /// Length of the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        let mut depths = vec![0usize; self.nodes.len()];
        let mut max = 0;
        for (idx, node) in self.nodes.iter().enumerate() {
            if let Node::Split { left, right, .. } = *node {
                let child = depths[idx] + 1;
                depths[left] = child;
                depths[right] = child;
                max = max.max(child);
            }
        }
        max
    }

    /// Check the structure of a deserialized tree before it is used
    pub fn validate_structure(&self) -> Result<(), ModelError> {
        if self.nodes.is_empty() {
            return Err(ModelError::InvalidParameter("tree has no nodes".to_string()));
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match *node {
                Node::Leaf { value, .. } if !value.is_finite() => {
                    return Err(ModelError::InvalidParameter(format!(
                        "leaf {idx} has a non-finite value"
                    )));
                }
                Node::Split {
                    feature,
                    left,
                    right,
                    ..
                } => {
                    let in_range = |child: usize| child > idx && child < self.nodes.len();
                    if feature >= self.n_features || !in_range(left) || !in_range(right) {
                        return Err(ModelError::InvalidParameter(format!(
                            "split node {idx} references an invalid feature or child"
                        )));
                    }
                }
                Node::Leaf { .. } => {}
            }
        }
        Ok(())
    }
}

impl Regressor for DecisionTreeRegressor {
    fn predict_row(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                Node::Leaf { value, .. } => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[feature] <= threshold { left } else { right };
                }
            }
        }
    }

    fn n_features(&self) -> usize {
        self.n_features
    }
}

struct Split {
    feature: usize,
    threshold: f64,
}

struct TreeBuilder<'a> {
    x: &'a Array2<f64>,
    y: &'a Array1<f64>,
    params: &'a TreeParams,
    nodes: Vec<Node>,
}

impl TreeBuilder<'_> {
    /// Grow the subtree for `samples` and return its root index
    fn grow(&mut self, samples: Vec<usize>, depth: usize) -> usize {
        let n = samples.len();
        let value = samples.iter().map(|&i| self.y[i]).sum::<f64>() / n as f64;
        let id = self.nodes.len();
        self.nodes.push(Node::Leaf { value, samples: n });

        if depth >= self.params.max_depth
            || n < self.params.min_samples_split
            || n < 2 * self.params.min_samples_leaf
            || self.is_pure(&samples)
        {
            return id;
        }

        let Some(split) = self.best_split(&samples) else {
            return id;
        };

        let (left, right): (Vec<usize>, Vec<usize>) = samples
            .into_iter()
            .partition(|&i| self.x[[i, split.feature]] <= split.threshold);

        let left = self.grow(left, depth + 1);
        let right = self.grow(right, depth + 1);
        self.nodes[id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        id
    }

    fn is_pure(&self, samples: &[usize]) -> bool {
        let first = self.y[samples[0]];
        samples.iter().all(|&i| self.y[i] == first)
    }

    /// Exhaustive search over features and midpoints between distinct values.
    ///
    /// Minimising the children's summed squared error is equivalent to
    /// maximising `sum_l^2 / n_l + sum_r^2 / n_r`, which needs only running sums.
    fn best_split(&self, samples: &[usize]) -> Option<Split> {
        let n = samples.len();
        let min_leaf = self.params.min_samples_leaf;
        let total: f64 = samples.iter().map(|&i| self.y[i]).sum();

        let mut best: Option<Split> = None;
        let mut best_score = f64::NEG_INFINITY;
        let mut column: Vec<(f64, f64)> = Vec::with_capacity(n);

        for feature in 0..self.x.ncols() {
            column.clear();
            column.extend(samples.iter().map(|&i| (self.x[[i, feature]], self.y[i])));
            column.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left_sum = 0.0;
            for k in 1..n {
                left_sum += column[k - 1].1;
                if k < min_leaf || n - k < min_leaf {
                    continue;
                }
                let (lo, hi) = (column[k - 1].0, column[k].0);
                if lo >= hi {
                    continue;
                }

                let right_sum = total - left_sum;
                let score = left_sum * left_sum / k as f64 + right_sum * right_sum / (n - k) as f64;
                if score > best_score {
                    best_score = score;
                    let mid = lo + (hi - lo) / 2.0;
                    let threshold = if mid < hi && mid.is_finite() { mid } else { lo };
                    best = Some(Split { feature, threshold });
                }
            }
        }

        best
    }
}
