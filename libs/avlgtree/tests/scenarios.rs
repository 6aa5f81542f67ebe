mod common;

use avlgtree::{AVLGTree, EmptyTree, InvalidImbalance};

use crate::common::max_height;

#[test]
fn construction_validates_imbalance() {
    assert!(matches!(AVLGTree::<u32>::new(0), Err(InvalidImbalance { .. })));
    assert_eq!(AVLGTree::<u32>::new(-5).unwrap_err().requested(), -5);
    assert_eq!(
        AVLGTree::<u32>::new(0).unwrap_err().to_string(),
        "maximum imbalance must be at least 1, but was 0"
    );

    let tree = AVLGTree::<u32>::new(1).unwrap();
    assert_eq!(tree.max_imbalance(), 1);
}

#[test]
fn empty_tree() {
    common::init_tracing();

    let mut tree = AVLGTree::<u32>::new(4).unwrap();
    assert!(tree.is_empty());
    assert_eq!(tree.size(), 0);
    assert_eq!(tree.height(), -1);

    assert!(matches!(tree.search(&4), Err(EmptyTree { .. })));
    assert!(tree.remove(&4).is_err());
    assert!(tree.root_key().is_err());
    assert_eq!(tree.root_key().unwrap_err().to_string(), "tree is empty");

    // recoverable: insert and retry
    tree.insert(4);
    assert_eq!(tree.search(&4), Ok(Some(&4)));
    assert_eq!(tree.root_key(), Ok(&4));
    assert_eq!(tree.remove(&4), Ok(Some(4)));
    assert!(tree.search(&4).is_err());
}

#[test]
fn ascending_inserts_build_perfect_avl_tree() {
    common::init_tracing();

    let mut tree = AVLGTree::new(1).unwrap();
    for key in 1..=7 {
        tree.insert(key);
        assert!(tree.satisfies_ordering());
        assert!(tree.satisfies_balance());
    }

    assert_eq!(tree.size(), 7);
    assert_eq!(tree.height(), 2);
    assert_eq!(tree.root_key(), Ok(&4));
    tree.assert_valid();

    assert_eq!(tree.remove(&4), Ok(Some(4)));
    assert!(tree.satisfies_balance());
    assert_eq!(tree.size(), 6);
    assert_eq!(tree.search(&4), Ok(None));
    // the in-order successor took the root's place
    assert_eq!(tree.root_key(), Ok(&5));
    assert_eq!(tree.height(), 2);
    tree.assert_valid();
}

#[test]
fn larger_bound_defers_rotations() {
    let mut avl = AVLGTree::new(1).unwrap();
    let mut avl2 = AVLGTree::new(2).unwrap();
    let mut avl3 = AVLGTree::new(3).unwrap();

    for key in 1..=3 {
        avl.insert(key);
        avl2.insert(key);
        avl3.insert(key);
    }

    // a right-leaning chain of three is already too tall for G = 1
    assert_eq!(avl.root_key(), Ok(&2));
    assert_eq!(avl.height(), 1);
    // ...but still fine for G = 2 and G = 3
    assert_eq!(avl2.root_key(), Ok(&1));
    assert_eq!(avl2.height(), 2);
    assert_eq!(avl3.root_key(), Ok(&1));
    assert_eq!(avl3.height(), 2);

    avl2.insert(4);
    avl3.insert(4);

    assert_eq!(avl2.root_key(), Ok(&2));
    assert_eq!(avl2.height(), 2);
    assert_eq!(avl3.root_key(), Ok(&1));
    assert_eq!(avl3.height(), 3);

    avl2.assert_valid();
    avl3.assert_valid();
}

#[test]
fn height_grows_with_imbalance_bound() {
    let mut previous = -1;

    for max_imbalance in 1..=5 {
        let mut tree = AVLGTree::new(max_imbalance).unwrap();
        tree.extend(0..1000);
        tree.assert_valid();

        let height = tree.height();
        assert!(
            height >= previous,
            "G = {max_imbalance} produced height {height}, lower than {previous} for G - 1"
        );
        assert!(height <= max_height(tree.size(), max_imbalance));
        previous = height;
    }
}

#[test]
fn classic_avl_height_bound() {
    let mut tree = AVLGTree::new(1).unwrap();

    for key in (0..4096).rev() {
        tree.insert(key);
        assert!(tree.height() <= max_height(tree.size(), 1));
    }

    // 4096 keys never need more than 1.44log2(n) levels
    assert!(tree.height() <= 16);
}

#[test]
fn removing_last_key_empties_tree() {
    let mut tree = AVLGTree::new(2).unwrap();
    tree.insert("only");

    assert_eq!(tree.remove("only"), Ok(Some("only")));
    assert!(tree.is_empty());
    assert_eq!(tree.height(), -1);
    assert_eq!(tree.size(), 0);
    assert!(tree.remove("only").is_err());
}

#[test]
fn clear() {
    let mut tree = AVLGTree::new(2).unwrap();
    tree.extend((0..500).map(|i| i * 7));
    assert_eq!(tree.size(), 500);

    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.size(), 0);
    assert_eq!(tree.height(), -1);
    assert!(tree.search(&7).is_err());

    // the tree is reusable afterwards
    tree.insert(1);
    assert_eq!(tree.root_key(), Ok(&1));
    tree.assert_valid();
}

#[test]
fn zig_zag_removals() {
    for max_imbalance in 1..=3 {
        let mut tree = AVLGTree::new(max_imbalance).unwrap();
        // interleave low and high keys so removals leave inner grandchildren behind
        tree.extend([50, 25, 75, 10, 40, 60, 90, 30, 45, 35, 42, 47, 5, 95]);
        tree.assert_valid();

        for key in [5, 10, 95, 90, 60, 75] {
            assert_eq!(tree.remove(&key), Ok(Some(key)));
            tree.assert_valid();
            assert!(tree.satisfies_balance());
        }

        assert_eq!(tree.size(), 8);
        for key in [25, 30, 35, 40, 42, 45, 47, 50] {
            assert!(tree.contains(&key));
        }
    }
}
