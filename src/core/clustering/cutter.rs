//! 把合并树切成时间连续的扁平簇
//!
//! Both passes walk the tree with an explicit stack: a scene of near-static
//! footage produces a merge chain `n - 1` levels deep.

use super::linkage::Linkage;

/// 每个内部节点子树中最大的合并距离，按 `id - n_leaves` 索引
pub fn max_merge_distances(linkage: &Linkage) -> Vec<f64> {
    let n = linkage.n_leaves();
    let mut max_dist = vec![0.0; linkage.merges().len()];
    let Some(root) = linkage.root() else {
        return max_dist;
    };

    let mut visited = vec![false; linkage.merges().len()];
    let mut stack = vec![root];

    while let Some(&node) = stack.last() {
        let merge = linkage.merge_of(node);

        // 先把未访问的子树处理完
        let pending = [merge.left, merge.right]
            .into_iter()
            .find(|&child| !linkage.is_leaf(child) && !visited[child - n]);
        if let Some(child) = pending {
            visited[child - n] = true;
            stack.push(child);
            continue;
        }

        let mut worst = merge.distance;
        for child in [merge.left, merge.right] {
            if !linkage.is_leaf(child) {
                worst = worst.max(max_dist[child - n]);
            }
        }
        max_dist[node - n] = worst;
        stack.pop();
    }

    max_dist
}

/// 自顶向下切树，返回每个叶子的簇标签（从 1 开始）
///
/// `should_cut(distance, left_size, right_size)` is asked at every internal
/// node that is not already inside a cut cluster, with the node's entry
/// from `max_dist`. A `true` answer turns the whole subtree into one
/// cluster. Leaves reached outside any cut become singletons.
///
/// The enclosing cluster travels down the stack with each node, so a cut in
/// one subtree can never leak into its sibling. Labels increase in leaf
/// order.
pub fn form_clusters<F>(linkage: &Linkage, max_dist: &[f64], mut should_cut: F) -> Vec<u32>
where
    F: FnMut(f64, usize, usize) -> bool,
{
    let n = linkage.n_leaves();
    let mut labels = vec![0u32; n];
    let Some(root) = linkage.root() else {
        labels.fill(1);
        return labels;
    };

    let mut next_label = 0u32;
    // (node, label of the cut cluster enclosing it)
    let mut stack: Vec<(usize, Option<u32>)> = vec![(root, None)];

    while let Some((node, enclosing)) = stack.pop() {
        if linkage.is_leaf(node) {
            labels[node] = match enclosing {
                Some(label) => label,
                None => {
                    next_label += 1;
                    next_label
                }
            };
            continue;
        }

        let merge = linkage.merge_of(node);
        let scope = match enclosing {
            Some(label) => Some(label),
            None => {
                let left_size = linkage.node_size(merge.left);
                let right_size = linkage.node_size(merge.right);
                if should_cut(max_dist[node - n], left_size, right_size) {
                    next_label += 1;
                    Some(next_label)
                } else {
                    None
                }
            }
        };

        // 右子树后入栈，保证左边的叶子先拿到标签
        stack.push((merge.right, scope));
        stack.push((merge.left, scope));
    }

    labels
}

/// [`max_merge_distances`] followed by [`form_clusters`].
pub fn cut_tree<F>(linkage: &Linkage, should_cut: F) -> Vec<u32>
where
    F: FnMut(f64, usize, usize) -> bool,
{
    let max_dist = max_merge_distances(linkage);
    form_clusters(linkage, &max_dist, should_cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clustering::distance::DistanceMatrix;
    use crate::core::clustering::linkage::{LinkageMethod, MergeEvent};
    use crate::core::clustering::merger::build_linkage;
    use ndarray::Array2;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn linkage_from(n: usize, merges: &[(usize, usize, f64)]) -> Linkage {
        let mut linkage = Linkage::with_capacity(n);
        let mut sizes: Vec<usize> = vec![1; n];
        for &(left, right, distance) in merges {
            let size = sizes[left] + sizes[right];
            sizes.push(size);
            linkage.push(MergeEvent {
                left,
                right,
                distance,
                size,
            });
        }
        linkage
    }

    fn assert_contiguous(labels: &[u32]) {
        let mut seen = std::collections::HashSet::new();
        for (i, &label) in labels.iter().enumerate() {
            if i > 0 && labels[i - 1] == label {
                continue;
            }
            assert!(seen.insert(label), "label {} reappears in {:?}", label, labels);
        }
    }

    #[test]
    fn test_max_merge_distances_cover_subtree() {
        // average linkage can produce a parent closer than its child
        let linkage = linkage_from(4, &[(0, 1, 0.8), (4, 2, 0.2), (5, 3, 0.5)]);
        assert_eq!(max_merge_distances(&linkage), vec![0.8, 0.8, 0.8]);

        let linkage = linkage_from(4, &[(0, 1, 0.1), (2, 3, 0.3), (4, 5, 0.2)]);
        assert_eq!(max_merge_distances(&linkage), vec![0.1, 0.3, 0.3]);
    }

    #[test]
    fn test_single_leaf_gets_label_one() {
        let linkage = Linkage::with_capacity(1);
        assert_eq!(cut_tree(&linkage, |_, _, _| false), vec![1]);
    }

    #[test]
    fn test_cut_at_root_gives_one_cluster() {
        let linkage = linkage_from(3, &[(0, 1, 0.1), (3, 2, 0.2)]);
        assert_eq!(cut_tree(&linkage, |_, _, _| true), vec![1, 1, 1]);
    }

    #[test]
    fn test_no_cut_gives_singletons() {
        let linkage = linkage_from(4, &[(1, 2, 0.1), (0, 4, 0.2), (5, 3, 0.3)]);
        assert_eq!(cut_tree(&linkage, |_, _, _| false), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_sibling_cuts_are_independent() {
        let linkage = linkage_from(4, &[(0, 1, 0.1), (2, 3, 0.9), (4, 5, 1.0)]);
        let labels = cut_tree(&linkage, |distance, _, _| distance <= 0.5);
        assert_eq!(labels, vec![1, 1, 2, 3]);
    }

    #[test]
    fn test_predicate_sees_subtree_maximum() {
        let linkage = linkage_from(3, &[(0, 1, 0.8), (3, 2, 0.2)]);
        let labels = cut_tree(&linkage, |distance, _, _| distance <= 0.5);
        assert_eq!(labels, vec![1, 2, 3]);
    }

    #[test]
    fn test_predicate_receives_child_sizes() {
        let linkage = linkage_from(4, &[(0, 1, 0.1), (4, 2, 0.2), (5, 3, 0.3)]);
        let mut calls = Vec::new();
        cut_tree(&linkage, |distance, left, right| {
            calls.push((distance, left, right));
            false
        });
        assert_eq!(calls, vec![(0.3, 3, 1), (0.2, 2, 1), (0.1, 1, 1)]);
    }

    #[test]
    fn test_no_predicate_below_cut() {
        let linkage = linkage_from(4, &[(0, 1, 0.1), (2, 3, 0.2), (4, 5, 0.3)]);
        let mut calls = 0;
        let labels = cut_tree(&linkage, |_, _, _| {
            calls += 1;
            true
        });
        assert_eq!(calls, 1);
        assert_eq!(labels, vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let n = 200_000;
        let mut merges = vec![(0, 1, 0.0)];
        for leaf in 2..n {
            merges.push((n + leaf - 2, leaf, leaf as f64));
        }
        let linkage = linkage_from(n, &merges);
        let labels = cut_tree(&linkage, |_, _, _| false);
        assert_eq!(labels.len(), n);
        assert_eq!(labels[n - 1] as usize, n);
    }

    #[test]
    fn test_random_labels_are_contiguous_runs() {
        let mut rng = StdRng::seed_from_u64(11);
        for n in 1..50 {
            let mut values = Array2::zeros((n, n));
            for i in 0..n {
                for j in i + 1..n {
                    let d: f64 = rng.gen_range(0.0..1.0);
                    values[[i, j]] = d;
                    values[[j, i]] = d;
                }
            }
            let distances = DistanceMatrix::new(values).unwrap();
            let linkage = build_linkage(&distances, LinkageMethod::Average);
            let threshold: f64 = rng.gen_range(0.2..0.8);

            let labels = cut_tree(&linkage, |distance, _, _| distance <= threshold);
            assert_eq!(labels.len(), n);
            assert_contiguous(&labels);

            let again = cut_tree(&linkage, |distance, _, _| distance <= threshold);
            assert_eq!(labels, again);
        }
    }
}
