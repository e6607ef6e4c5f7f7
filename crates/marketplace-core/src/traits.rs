// crates/marketplace-core/src/traits.rs
use crate::location::Coordinates;
use crate::text::{contains_folded, fold_lower};

/// Name-based matching helpers for types that expose a display name.
///
/// Implementors provide a `&str` view of their name via
/// [`NameMatch::name_str`] and get case-insensitive helpers:
/// - [`NameMatch::is_named`] - equality ignoring case
/// - [`NameMatch::name_contains`] - substring match ignoring case
///
/// # Examples
/// ```rust
/// use marketplace_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("Paris").is_named("PARIS"));
/// assert!(Place("Paris").name_contains("par"));
/// ```
pub trait NameMatch {
    /// Returns the display name used for matching.
    fn name_str(&self) -> &str;

    #[inline]
    fn is_named(&self, q: &str) -> bool {
        fold_lower(self.name_str()) == fold_lower(q)
    }

    /// Case-insensitive substring match. An empty `q` matches everything.
    #[inline]
    fn name_contains(&self, q: &str) -> bool {
        contains_folded(self.name_str(), q)
    }
}

impl NameMatch for str {
    fn name_str(&self) -> &str {
        self
    }
}

/// Anything that may carry a point on the globe.
///
/// Ad locations and search filters both implement this, so radius and
/// distance checks accept either side without conversion.
pub trait Positioned {
    fn coordinates(&self) -> Option<Coordinates>;
}

impl Positioned for Coordinates {
    fn coordinates(&self) -> Option<Coordinates> {
        Some(*self)
    }
}

impl<T: Positioned> Positioned for Option<T> {
    fn coordinates(&self) -> Option<Coordinates> {
        self.as_ref().and_then(Positioned::coordinates)
    }
}

impl<T: Positioned + ?Sized> Positioned for &T {
    fn coordinates(&self) -> Option<Coordinates> {
        (**self).coordinates()
    }
}
