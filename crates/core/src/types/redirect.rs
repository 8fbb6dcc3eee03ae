//! Post-action redirect allow-list.
//!
//! Forms carry a `next` parameter naming where the customer should land after
//! registering or logging in. Only destinations listed here are honoured;
//! anything else is dropped, so the parameter cannot be used as an open
//! redirect.

use serde::{Deserialize, Serialize};

/// A permitted post-login destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectTarget {
    /// Shipping step of checkout (`/checkout/shipping/`).
    CheckoutShipping,
}

impl RedirectTarget {
    /// Every permitted destination.
    pub const ALL: &'static [Self] = &[Self::CheckoutShipping];

    /// Look up a destination by its exact path.
    ///
    /// Returns `None` for anything not on the allow-list. Matching is exact:
    /// no normalisation, no prefix matching, no case folding.
    ///
    /// ```
    /// use northwind_core::RedirectTarget;
    ///
    /// assert_eq!(
    ///     RedirectTarget::from_path("/checkout/shipping/"),
    ///     Some(RedirectTarget::CheckoutShipping)
    /// );
    /// assert_eq!(RedirectTarget::from_path("https://evil.example/"), None);
    /// ```
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.path() == path)
    }

    /// Parse an optional form or query value, treating empty as absent.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Option<Self> {
        value.filter(|v| !v.is_empty()).and_then(Self::from_path)
    }

    /// The path this destination redirects to.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::CheckoutShipping => "/checkout/shipping/",
        }
    }
}

impl std::fmt::Display for RedirectTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_listed_path() {
        assert_eq!(
            RedirectTarget::from_path("/checkout/shipping/"),
            Some(RedirectTarget::CheckoutShipping)
        );
    }

    #[test]
    fn test_rejects_near_misses() {
        assert_eq!(RedirectTarget::from_path("/checkout/shipping"), None);
        assert_eq!(RedirectTarget::from_path("/CHECKOUT/SHIPPING/"), None);
        assert_eq!(RedirectTarget::from_path("/checkout/shipping/x"), None);
        assert_eq!(RedirectTarget::from_path("//evil.example"), None);
        assert_eq!(RedirectTarget::from_path("/cart"), None);
        assert_eq!(RedirectTarget::from_path("/"), None);
    }

    #[test]
    fn test_from_param() {
        assert_eq!(RedirectTarget::from_param(None), None);
        assert_eq!(RedirectTarget::from_param(Some("")), None);
        assert_eq!(
            RedirectTarget::from_param(Some("/checkout/shipping/")),
            Some(RedirectTarget::CheckoutShipping)
        );
    }

    #[test]
    fn test_path_round_trips_for_every_target() {
        for target in RedirectTarget::ALL {
            assert_eq!(RedirectTarget::from_path(target.path()), Some(*target));
        }
    }
}
