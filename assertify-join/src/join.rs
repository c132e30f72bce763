//! Grouping and SQL-like joins over slices.
//!
//! Keys are derived from each item by a closure. Results borrow from the
//! input slices and keep the order of the left input.

use std::collections::HashMap;
use std::hash::Hash;

/// A matching pair from an inner join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Joined<'a, L, R, K> {
    pub left: &'a L,
    pub right: &'a R,
    pub key: K,
}

/// An entry of a left join. `right` is `None` for a left item without a
/// match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeftJoined<'a, L, R, K> {
    pub left: &'a L,
    pub right: Option<&'a R>,
    pub key: K,
}

/// Group items by a derived key. Items keep their relative order inside a
/// group.
pub fn group_by<'a, T, K, F>(items: &'a [T], mut key: F) -> HashMap<K, Vec<&'a T>>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut groups: HashMap<K, Vec<&'a T>> = HashMap::new();
    for item in items {
        groups.entry(key(item)).or_default().push(item);
    }
    groups
}

/// Every `(left, right)` pair whose keys are equal.
pub fn inner_join<'a, L, R, K, FL, FR>(
    left: &'a [L],
    right: &'a [R],
    left_key: FL,
    right_key: FR,
) -> Vec<Joined<'a, L, R, K>>
where
    K: Eq + Hash + Clone,
    FL: FnMut(&L) -> K,
    FR: FnMut(&R) -> K,
{
    left_join(left, right, left_key, right_key)
        .into_iter()
        .filter_map(|joined| {
            joined.right.map(|right| Joined {
                left: joined.left,
                right,
                key: joined.key,
            })
        })
        .collect()
}

/// Like [`inner_join`], plus one entry without a right side for every left
/// item that has no match.
pub fn left_join<'a, L, R, K, FL, FR>(
    left: &'a [L],
    right: &'a [R],
    mut left_key: FL,
    right_key: FR,
) -> Vec<LeftJoined<'a, L, R, K>>
where
    K: Eq + Hash + Clone,
    FL: FnMut(&L) -> K,
    FR: FnMut(&R) -> K,
{
    let right_groups = group_by(right, right_key);

    let mut joined = Vec::with_capacity(left.len());
    for item in left {
        let key = left_key(item);
        match right_groups.get(&key) {
            Some(matches) => {
                for right in matches {
                    joined.push(LeftJoined {
                        left: item,
                        right: Some(*right),
                        key: key.clone(),
                    });
                }
            }
            None => joined.push(LeftJoined {
                left: item,
                right: None,
                key,
            }),
        }
    }
    joined
}
