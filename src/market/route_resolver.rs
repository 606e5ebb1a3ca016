//! Fewest-hop route search over the direct trade map.
//!
//! Every pair is an undirected edge between its two denoms. A breadth-first
//! search from the offer denom finds a route with the fewest hops, visiting
//! each denom at most once, so resolution is `O(pairs)`.
//!
//! Ties between equally short routes are broken by neighbour order in the
//! map, which [`Market`](super::Market) builds in pair-key order. The same
//! market state therefore always yields the same route.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use crate::domain::{Denom, Hop, Route};

/// Denom to the denoms it trades against directly, in pair-key order.
pub type DirectTradeMap = BTreeMap<Denom, Vec<Denom>>;

/// Finds a fewest-hop route from `from` to `to`.
///
/// Returns `Some` of an empty route when `from == to`, and `None` when the
/// two denoms are not connected (including when either is unknown).
///
/// # Example
///
/// ```rust
/// use swap_market::domain::Denom;
/// use swap_market::market::{resolve_route, DirectTradeMap};
///
/// let d = |s: &str| -> Denom { s.parse().expect("denom") };
/// let mut map = DirectTradeMap::new();
/// map.insert(d("uaaa"), vec![d("ubbb")]);
/// map.insert(d("ubbb"), vec![d("uaaa"), d("uccc")]);
/// map.insert(d("uccc"), vec![d("ubbb")]);
///
/// let route = resolve_route(&map, &d("uaaa"), &d("uccc")).expect("connected");
/// assert_eq!(route.to_string(), "uaaa -> ubbb -> uccc");
/// assert!(resolve_route(&map, &d("uaaa"), &d("uzzz")).is_none());
/// ```
#[must_use]
pub fn resolve_route(map: &DirectTradeMap, from: &Denom, to: &Denom) -> Option<Route> {
    if from == to {
        return Some(Route::empty());
    }
    let mut parent: HashMap<&Denom, &Denom> = HashMap::new();
    let mut visited: HashSet<&Denom> = HashSet::from([from]);
    let mut queue: VecDeque<&Denom> = VecDeque::from([from]);

    while let Some(current) = queue.pop_front() {
        let Some(neighbours) = map.get(current) else {
            continue;
        };
        for next in neighbours {
            if !visited.insert(next) {
                continue;
            }
            parent.insert(next, current);
            if next == to {
                return Some(unwind(&parent, from, to));
            }
            queue.push_back(next);
        }
    }
    None
}

/// Walks the parent links back from `to` and returns the hops in order.
fn unwind(parent: &HashMap<&Denom, &Denom>, from: &Denom, to: &Denom) -> Route {
    let mut hops = Vec::new();
    let mut current = to;
    while current != from {
        let Some(&prev) = parent.get(current) else {
            break;
        };
        hops.push(Hop::new(prev.clone(), current.clone()));
        current = prev;
    }
    hops.reverse();
    Route::new(hops)
}
