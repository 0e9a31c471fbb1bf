//! Regression tree storage and traversal.
use ndarray::ArrayView1;

use super::ModelError;

const LEAF: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Node {
    left: i32,
    right: i32,
    split_index: usize,
    /// Split threshold for internal nodes, leaf value for leaves.
    value: f32,
    default_left: bool,
}

impl Node {
    fn is_leaf(&self) -> bool {
        self.left == LEAF
    }
}

/// A single regression tree in flat, index-linked form.
#[derive(Debug, Clone, PartialEq)]
pub struct RegTree {
    nodes: Vec<Node>,
}

/// Column-oriented node arrays as stored in the model file.
#[derive(Debug, Clone, Copy)]
pub struct TreeArrays<'a> {
    pub left_children: &'a [i32],
    pub right_children: &'a [i32],
    pub split_indices: &'a [i64],
    pub split_conditions: &'a [f32],
    pub default_left: &'a [bool],
}

impl RegTree {
    /// Build and validate a tree. `tree` is only used for error reporting.
    pub fn from_arrays(
        tree: usize,
        arrays: TreeArrays<'_>,
        num_feature: usize,
    ) -> Result<Self, ModelError> {
        let invalid = |reason: String| ModelError::InvalidTree { tree, reason };

        let n = arrays.left_children.len();
        if n == 0 {
            return Err(invalid("no nodes".to_string()));
        }
        let lengths = [
            ("right_children", arrays.right_children.len()),
            ("split_indices", arrays.split_indices.len()),
            ("split_conditions", arrays.split_conditions.len()),
            ("default_left", arrays.default_left.len()),
        ];
        for (name, len) in lengths {
            if len != n {
                return Err(invalid(format!(
                    "`{name}` has {len} entries, expected {n}"
                )));
            }
        }

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let left = arrays.left_children[i];
            let right = arrays.right_children[i];
            let split_index = arrays.split_indices[i];

            if left != LEAF {
                for child in [left, right] {
                    if child <= i as i32 || child as usize >= n {
                        return Err(invalid(format!("node {i} has invalid child {child}")));
                    }
                }
                if split_index < 0 || split_index as usize >= num_feature {
                    return Err(invalid(format!(
                        "node {i} splits on feature {split_index}, model has {num_feature}"
                    )));
                }
            }

            nodes.push(Node {
                left,
                right,
                split_index: split_index.max(0) as usize,
                value: arrays.split_conditions[i],
                default_left: arrays.default_left[i],
            });
        }

        Ok(Self { nodes })
    }

    /// A tree consisting of a single leaf.
    pub fn leaf(value: f32) -> Self {
        Self {
            nodes: vec![Node {
                left: LEAF,
                right: LEAF,
                split_index: 0,
                value,
                default_left: true,
            }],
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Walk from the root to a leaf and return its value.
    ///
    /// Missing (NaN) values follow the node's default direction; otherwise a
    /// row goes left when its value is strictly below the threshold.
    pub fn predict(&self, row: ArrayView1<'_, f32>) -> f32 {
        let mut idx = 0;
        loop {
            let node = &self.nodes[idx];
            if node.is_leaf() {
                return node.value;
            }
            let x = row[node.split_index];
            let go_left = if x.is_nan() {
                node.default_left
            } else {
                x < node.value
            };
            let next = if go_left { node.left } else { node.right };
            idx = next as usize;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    // root: x[1] < 120 ? (x[5] < 30 ? -0.4 : 0.1) : 0.6
    fn sample_tree() -> RegTree {
        RegTree::from_arrays(
            0,
            TreeArrays {
                left_children: &[1, 3, -1, -1, -1],
                right_children: &[2, 4, -1, -1, -1],
                split_indices: &[1, 5, 0, 0, 0],
                split_conditions: &[120.0, 30.0, 0.6, -0.4, 0.1],
                default_left: &[true, false, false, false, false],
            },
            8,
        )
        .unwrap()
    }

    #[test]
    fn test_traversal() {
        let tree = sample_tree();
        let low = arr1(&[0.0, 100.0, 0.0, 0.0, 0.0, 25.0, 0.0, 0.0]);
        let mid = arr1(&[0.0, 100.0, 0.0, 0.0, 0.0, 35.0, 0.0, 0.0]);
        let high = arr1(&[0.0, 150.0, 0.0, 0.0, 0.0, 25.0, 0.0, 0.0]);
        assert_eq!(tree.predict(low.view()), -0.4);
        assert_eq!(tree.predict(mid.view()), 0.1);
        assert_eq!(tree.predict(high.view()), 0.6);
    }

    #[test]
    fn test_threshold_goes_right() {
        let tree = sample_tree();
        let row = arr1(&[0.0, 120.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(tree.predict(row.view()), 0.6);
    }

    #[test]
    fn test_missing_follows_default() {
        let tree = sample_tree();
        // root defaults left, node 1 defaults right
        let row = arr1(&[0.0, f32::NAN, 0.0, 0.0, 0.0, f32::NAN, 0.0, 0.0]);
        assert_eq!(tree.predict(row.view()), 0.1);
    }

    #[test]
    fn test_single_leaf() {
        let tree = RegTree::leaf(0.25);
        let row = arr1(&[0.0; 8]);
        assert_eq!(tree.predict(row.view()), 0.25);
        assert_eq!(tree.num_nodes(), 1);
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let err = RegTree::from_arrays(
            3,
            TreeArrays {
                left_children: &[1, -1, -1],
                right_children: &[2, -1],
                split_indices: &[0, 0, 0],
                split_conditions: &[1.0, 0.0, 0.0],
                default_left: &[true, false, false],
            },
            8,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::InvalidTree { tree: 3, .. }));
    }

    #[test]
    fn test_rejects_backward_child() {
        let err = RegTree::from_arrays(
            0,
            TreeArrays {
                left_children: &[1, 0, -1],
                right_children: &[2, 2, -1],
                split_indices: &[0, 0, 0],
                split_conditions: &[1.0, 1.0, 0.0],
                default_left: &[true, true, false],
            },
            8,
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid child 0"));
    }

    #[test]
    fn test_rejects_out_of_range_feature() {
        let err = RegTree::from_arrays(
            0,
            TreeArrays {
                left_children: &[1, -1, -1],
                right_children: &[2, -1, -1],
                split_indices: &[8, 0, 0],
                split_conditions: &[1.0, 0.0, 0.0],
                default_left: &[true, false, false],
            },
            8,
        )
        .unwrap_err();
        assert!(err.to_string().contains("feature 8"));
    }
}
