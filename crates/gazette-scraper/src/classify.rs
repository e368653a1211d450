//! Section inference from category hints and the headline.

use gazette_core::Category;

/// Maps category hints plus the title onto one newspaper section.
///
/// Both inputs are lower-cased before matching. Checks run in precedence
/// order across hints and title together: `opinion`, then `sport`, then
/// `art`/`culture`. Anything else is [`Category::News`].
#[must_use]
pub fn classify(hints: &str, title: &str) -> Category {
    let hints = hints.to_lowercase();
    let title = title.to_lowercase();
    let mentions = |needle: &str| hints.contains(needle) || title.contains(needle);

    if mentions("opinion") {
        Category::Opinions
    } else if mentions("sport") {
        Category::Sports
    } else if mentions("art") || mentions("culture") {
        Category::ArtsCulture
    } else {
        Category::News
    }
}

/// Joins raw category labels into the hint string fed to [`classify`].
#[must_use]
pub fn join_hints(categories: &[String]) -> String {
    categories.join(" ").to_lowercase()
}
