#![allow(unused, reason = "not used by all tests")]

use tracing_subscriber::EnvFilter;

/// Installs a test-friendly subscriber, `RUST_LOG=avlgtree=trace` shows every rotation.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// The tallest height any tree with `keys` keys may reach without breaking a balance bound of
/// `max_imbalance`.
///
/// The sparsest valid tree of height `h` holds `1 + N(h - 1) + N(h - 1 - G)` keys, where a
/// missing subtree (height -1 or lower) holds none.
pub fn max_height(keys: usize, max_imbalance: isize) -> isize {
    let max_imbalance = usize::try_from(max_imbalance).unwrap();

    // min_nodes[i] is the fewest keys of any valid tree of height i - 1
    let mut min_nodes = vec![0_usize];
    loop {
        let height = min_nodes.len() - 1;
        let taller = min_nodes[height] + min_nodes[height.saturating_sub(max_imbalance)] + 1;

        if taller > keys {
            return isize::try_from(height).unwrap() - 1;
        }
        min_nodes.push(taller);
    }
}
