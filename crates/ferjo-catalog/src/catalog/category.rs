//! Category options for the category selector.

use crate::catalog::ProductRecord;
use std::collections::BTreeSet;

/// Derive the category selector options from the full product set.
///
/// Options are the distinct, trimmed, non-empty category strings, sorted
/// lexicographically.
pub fn category_options<'a, I>(products: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a ProductRecord>,
{
    products
        .into_iter()
        .map(|p| p.category().trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
