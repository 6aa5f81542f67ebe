#![no_main]

use std::collections::BTreeSet;

use avlgtree::AVLGTree;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u8, Vec<u32>)| {
    let (max_imbalance, inserts) = input;
    let mut tree = AVLGTree::new(isize::from(max_imbalance % 8) + 1).unwrap();
    let mut seen = BTreeSet::new();

    for i in inserts {
        // duplicate keys are unsupported
        if seen.insert(i) {
            tree.insert(i);
            tree.assert_valid();
        }
    }
});
