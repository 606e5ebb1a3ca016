//! Multi-hop trade routes.

use core::fmt;

use super::Denom;

/// One direct trade through a single pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hop {
    /// Asset offered to the pair.
    pub from: Denom,
    /// Asset received from the pair.
    pub to: Denom,
}

impl Hop {
    /// Creates a hop.
    #[must_use]
    pub const fn new(from: Denom, to: Denom) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Hop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// An ordered, chained sequence of hops.
///
/// Every hop's `to` is the next hop's `from`. An empty route means the
/// source and destination are the same asset.
///
/// # Examples
///
/// ```
/// use swap_market::domain::{Denom, Hop, Route};
///
/// let a: Denom = "uaaa".parse().expect("denom");
/// let b: Denom = "ubbb".parse().expect("denom");
/// let c: Denom = "uccc".parse().expect("denom");
/// let route = Route::new(vec![Hop::new(a.clone(), b.clone()), Hop::new(b, c.clone())]);
/// assert!(route.connects(&a, &c));
/// assert_eq!(route.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Route(Vec<Hop>);

impl Route {
    /// Wraps a list of hops without checking that they chain.
    #[must_use]
    pub const fn new(hops: Vec<Hop>) -> Self {
        Self(hops)
    }

    /// The empty route.
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// The hops in trade order.
    #[must_use]
    pub fn hops(&self) -> &[Hop] {
        &self.0
    }

    /// Number of hops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the identity route.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the hops in trade order.
    pub fn iter(&self) -> core::slice::Iter<'_, Hop> {
        self.0.iter()
    }

    /// Returns `true` if the route starts at `from`, ends at `to`, and every
    /// hop chains into the next. The empty route connects `x` to itself.
    #[must_use]
    pub fn connects(&self, from: &Denom, to: &Denom) -> bool {
        let (Some(first), Some(last)) = (self.0.first(), self.0.last()) else {
            return from == to;
        };
        first.from == *from
            && last.to == *to
            && self.0.windows(2).all(|w| w[0].to == w[1].from)
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a Hop;
    type IntoIter = core::slice::Iter<'a, Hop>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.0.first() else {
            return f.write_str("(empty route)");
        };
        write!(f, "{}", first.from)?;
        for hop in &self.0 {
            write!(f, " -> {}", hop.to)?;
        }
        Ok(())
    }
}
