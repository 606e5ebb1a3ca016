//! Explicit rounding direction for integer division.

/// Rounding direction for divisions on [`Amount`](super::Amount).
///
/// The pool contracts floor every division, so almost every call site in
/// this crate passes [`Rounding::Down`]. `Up` exists for callers computing
/// minimum inputs.
///
/// # Examples
///
/// ```
/// use swap_market::domain::Rounding;
///
/// assert!(Rounding::Down.is_down());
/// assert!(!Rounding::Down.is_up());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor). What the chain does.
    #[default]
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}
