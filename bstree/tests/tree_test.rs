//! Behavioural tests for BinarySearchTree

use bstree::util::testing;
use bstree::BinarySearchTree;
use rstest::{fixture, rstest};

#[fixture]
fn sample() -> BinarySearchTree<i32> {
    testing::init_test_setup();
    BinarySearchTree::build([5, 3, 8, 1, 4, 7, 9])
}

/// Every node's value lies strictly between the bounds inherited from its ancestors.
fn assert_search_order(tree: &BinarySearchTree<i32>) {
    let mut stack = Vec::new();
    stack.extend(tree.root().map(|root| (root, i64::MIN, i64::MAX)));
    while let Some((node, low, high)) = stack.pop() {
        let value = i64::from(*node.value());
        assert!(low < value && value < high, "{value} outside ({low}, {high})");
        stack.extend(node.left().map(|left| (left, low, value)));
        stack.extend(node.right().map(|right| (right, value, high)));
    }
}

// ============================================================
// Construction
// ============================================================

#[rstest]
fn given_sample_values_when_building_then_inorder_is_sorted(sample: BinarySearchTree<i32>) {
    assert_eq!(sample.inorder(), vec![1, 3, 4, 5, 7, 8, 9]);
    assert_eq!(sample.len(), 7);
    assert!(sample.is_balanced());
    assert_search_order(&sample);
}

#[rstest]
#[case(vec![], -1)]
#[case(vec![42], 0)]
#[case(vec![2, 1], 1)]
#[case(vec![1, 2, 3], 1)]
#[case((1..=7).collect(), 2)]
#[case((1..=15).collect(), 3)]
#[case((1..=16).collect(), 4)]
fn given_n_values_when_building_then_height_is_floor_log2(
    #[case] values: Vec<i32>,
    #[case] expected: i64,
) {
    let tree = BinarySearchTree::build(values);
    assert_eq!(tree.height(), expected);
    assert!(tree.is_balanced());
}

#[test]
fn given_unsorted_input_with_duplicates_when_collecting_then_distinct_values_kept() {
    let tree: BinarySearchTree<i32> = [9, 1, 9, 4, 1, 7].into_iter().collect();
    assert_eq!(tree.inorder(), vec![1, 4, 7, 9]);
}

#[test]
fn given_strings_when_building_then_ordered_lexicographically() {
    let tree = BinarySearchTree::build(["pear", "apple", "fig"].map(String::from));
    assert_eq!(tree.inorder(), vec!["apple", "fig", "pear"]);
    assert!(tree.find(&"fig".to_string()).is_some());
}

// ============================================================
// Insert / delete / find
// ============================================================

#[rstest]
fn given_values_above_range_when_inserting_then_tree_unbalances_and_rebalance_restores(
    mut sample: BinarySearchTree<i32>,
) {
    for value in [100, 101, 102] {
        assert!(sample.insert(value));
    }
    assert!(!sample.is_balanced());
    assert_search_order(&sample);

    sample.rebalance();

    assert!(sample.is_balanced());
    assert_eq!(sample.inorder(), vec![1, 3, 4, 5, 7, 8, 9, 100, 101, 102]);
    assert_eq!(sample.height(), 3);
}

#[rstest]
fn given_present_value_when_inserting_again_then_inorder_unchanged(
    mut sample: BinarySearchTree<i32>,
) {
    let before = sample.inorder();
    assert!(!sample.insert(4));
    assert_eq!(sample.inorder(), before);
}

#[rstest]
#[case::leaf(1)]
#[case::inner_two_children(3)]
#[case::root(5)]
#[case::right_inner(8)]
fn given_present_value_when_deleting_then_only_it_disappears(
    mut sample: BinarySearchTree<i32>,
    #[case] value: i32,
) {
    let mut expected = sample.inorder();
    expected.retain(|v| *v != value);

    assert_eq!(sample.delete(&value), Some(value));

    assert!(sample.find(&value).is_none());
    assert_eq!(sample.inorder(), expected);
    assert_eq!(sample.len(), expected.len());
    assert_search_order(&sample);
}

#[rstest]
fn given_node_with_only_left_child_when_deleting_then_child_moves_up(
    mut sample: BinarySearchTree<i32>,
) {
    sample.insert(0);
    sample.delete(&4);
    // 3 now has only a left child (1 -> 0)
    sample.delete(&3);

    let root = sample.root().unwrap();
    assert_eq!(root.left().map(|n| *n.value()), Some(1));
    assert_eq!(sample.inorder(), vec![0, 1, 5, 7, 8, 9]);
}

#[rstest]
fn given_absent_value_when_deleting_then_noop(mut sample: BinarySearchTree<i32>) {
    let before = sample.preorder();
    assert_eq!(sample.delete(&6), None);
    assert_eq!(sample.preorder(), before);
}

#[rstest]
fn given_value_when_finding_then_handle_exposes_subtree(sample: BinarySearchTree<i32>) {
    let node = sample.find(&8).expect("8 is present");
    assert_eq!(*node.value(), 8);
    assert_eq!(node.left().map(|n| *n.value()), Some(7));
    assert_eq!(node.right().map(|n| *n.value()), Some(9));
    assert_eq!(sample.height_of(Some(node.index())), 1);
    assert!(sample.find(&2).is_none());
}

#[rstest]
fn given_rebalance_when_finding_again_then_values_still_present(
    mut sample: BinarySearchTree<i32>,
) {
    sample.extend([10, 11, 12, 13]);
    sample.rebalance();
    for value in [1, 3, 4, 5, 7, 8, 9, 10, 11, 12, 13] {
        assert!(sample.contains(&value), "{value} lost by rebalance");
    }
}

// ============================================================
// Depth
// ============================================================

#[rstest]
fn given_chain_when_measuring_depth_then_grows_with_each_insert() {
    let mut tree = BinarySearchTree::new();
    tree.extend(1..=4);
    assert_eq!(tree.depth(&1), Some(0));
    assert_eq!(tree.depth(&4), Some(3));
    assert_eq!(tree.depth(&5), None);
}

// ============================================================
// Degenerate shapes
// ============================================================

#[test]
fn given_long_chain_when_traversing_then_does_not_overflow_stack() {
    let mut tree = BinarySearchTree::new();
    tree.extend(0..20_000);

    assert_eq!(tree.height(), 19_999);
    assert!(!tree.is_balanced());
    assert_eq!(tree.postorder().len(), 20_000);
    assert_eq!(tree.inorder().first(), Some(&0));
    assert_eq!(tree.delete(&10_000), Some(10_000));

    tree.rebalance();
    assert!(tree.is_balanced());
    assert_eq!(tree.height(), 14);
}

#[test]
fn given_cleared_tree_when_queried_then_neutral_results() {
    let mut tree = BinarySearchTree::build([1, 2, 3]);
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.height(), -1);
    assert!(tree.is_balanced());
    assert!(tree.level_order().is_empty());
    tree.rebalance();
    assert!(tree.is_empty());
}
