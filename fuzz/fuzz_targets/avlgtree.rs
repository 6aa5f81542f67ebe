#![no_main]

use std::collections::BTreeSet;

use avlgtree::{AVLGTree, EmptyTree};
use libfuzzer_sys::arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Action {
    Clear,
    Insert(u16),
    Remove(u16),
    Search(u16),
    RootKey,
}

#[derive(Debug, Arbitrary)]
struct Input {
    max_imbalance: u8,
    actions: Vec<Action>,
}

fuzz_target!(|input: Input| {
    let max_imbalance = isize::from(input.max_imbalance % 8) + 1;
    let mut tree = AVLGTree::new(max_imbalance).unwrap();
    let mut set = BTreeSet::new();

    for action in input.actions {
        match action {
            Action::Clear => {
                tree.clear();
                set.clear();
            }
            Action::Insert(key) => {
                if set.insert(key) {
                    tree.insert(key);
                }
            }
            Action::Remove(key) => {
                let res = tree.remove(&key);

                if set.is_empty() {
                    assert!(matches!(res, Err(EmptyTree { .. })));
                } else if set.remove(&key) {
                    assert_eq!(res, Ok(Some(key)));
                } else {
                    assert_eq!(res, Ok(None));
                }
            }
            Action::Search(key) => {
                let res = tree.search(&key);

                if set.is_empty() {
                    assert!(res.is_err());
                } else {
                    assert_eq!(res, Ok(set.get(&key)));
                }
            }
            Action::RootKey => {
                assert_eq!(tree.root_key().is_err(), set.is_empty());
            }
        }

        tree.assert_valid();
        assert!(tree.satisfies_balance());
        assert_eq!(tree.size(), set.len());
        assert_eq!(tree.is_empty(), set.is_empty());
    }
});
