use std::collections::{BTreeMap, BTreeSet};

use dualmap::{AvlTree, Error, OrderedMap, OrderedSet};

// No AVL tree of n keys is taller than this, counting a leaf as 0.
fn avl_height_bound(n: usize) -> i32 {
    (1.4405 * ((n + 2) as f64).log2() - 1.3277).floor() as i32
}

proptest::proptest! {
    #[test]
    fn ordmap_get_consistent(values: Vec<(u8, u16)>, key: u8) {
        let btree_map = BTreeMap::from_iter(values.iter().cloned());
        let ord_map = OrderedMap::from_iter(values.iter().cloned());

        assert_eq!(btree_map.get(&key), ord_map.get(&key));
        assert!(btree_map.iter().eq(ord_map.iter()));
        assert_eq!(btree_map.first_key_value(), ord_map.find_min());
        assert_eq!(btree_map.last_key_value(), ord_map.find_max());
        assert!(ord_map.verify());
    }

    #[test]
    fn ordmap_ops_consistent(ops: Vec<(bool, u8, u8)>) {
        let mut btree_map = BTreeMap::new();
        let mut ord_map = OrderedMap::new();

        for (is_insert, key, value) in ops {
            if is_insert {
                assert_eq!(btree_map.insert(key, value), ord_map.insert(key, value));
            } else {
                assert_eq!(btree_map.remove(&key), ord_map.remove(&key));
            }
            assert!(ord_map.verify());
        }

        assert_eq!(btree_map.len(), ord_map.len());
        assert!(btree_map.into_iter().eq(ord_map.into_iter()));
    }

    #[test]
    fn ordmap_remove_consistent(values in proptest::collection::btree_set(proptest::arbitrary::any::<u8>(), 1..256), indices: Vec<proptest::sample::Index>) {
        let mut btree_map = BTreeMap::from_iter(values.iter().cloned().map(|v| (v.to_string(), v.to_string())));
        let mut ord_map = OrderedMap::from_iter(values.iter().cloned().map(|v| (v.to_string(), v.to_string())));

        for index in indices {
            let index = index.index(values.len());
            let key = values.iter().nth(index).unwrap().to_string();

            assert_eq!(
                btree_map.remove(&key),
                ord_map.remove(&key)
            );

            assert_eq!(btree_map.get(&key), None);
            assert_eq!(ord_map.get(&key), None);

            assert!(
                btree_map.iter().eq(ord_map.iter())
            );
            assert!(ord_map.verify());
        }
    }

    #[test]
    fn ordset_consistent(values: Vec<u16>, probe: u16) {
        let btree_set = BTreeSet::from_iter(values.iter().cloned());
        let mut ord_set = OrderedSet::new();
        for v in values.iter() {
            let fresh = !ord_set.contains(v);
            assert_eq!(ord_set.insert(*v), fresh);
        }

        assert_eq!(btree_set.contains(&probe), ord_set.contains(&probe));
        assert!(btree_set.iter().eq(ord_set.iter()));
        assert!(ord_set.verify());
    }

    #[test]
    fn avltree_stays_balanced(values: BTreeSet<u16>) {
        let mut tree = AvlTree::new();
        for v in values.iter() {
            assert_eq!(tree.insert(*v), Ok(()));
        }
        assert!(tree.verify());
        assert!(tree.height() <= avl_height_bound(values.len()));

        // Every key is a duplicate now.
        for v in values.iter().take(8) {
            assert_eq!(tree.insert(*v), Err(Error::DuplicateKey));
        }

        for v in values.iter().step_by(2) {
            assert_eq!(tree.remove(v), Ok(*v));
        }
        assert!(tree.verify());
        assert!(tree.iter().eq(values.iter().skip(1).step_by(2)));
    }
}

#[test]
fn ordmap_key_set() {
    let map: OrderedMap<String, usize> = ["pear", "apple", "fig"]
        .into_iter()
        .enumerate()
        .map(|(i, k)| (k.to_string(), i))
        .collect();
    let keys = map.key_set();
    assert_eq!(keys.to_string(), "[ apple, fig, pear ]");
    assert_eq!(map.to_string(), "[ <apple, 1>, <fig, 2>, <pear, 0> ]");
}
