use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::AppResult;
use crate::store::CatalogStore;

/// Filter options offered alongside a catalog listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Facets {
    pub genres: Vec<String>,
    pub directors: Vec<String>,
    pub years: Vec<i32>,
}

/// Derives the facet lists from the whole catalog.
///
/// Genre facets are individual tags: stored values like "Comedy, Romance"
/// are split on commas and merged across movies. Facets always describe
/// the full catalog rather than the filtered result, so narrowing by one
/// facet never hides the other options.
pub async fn build(store: &dyn CatalogStore) -> AppResult<Facets> {
    let (genre_values, directors, years) = tokio::try_join!(
        store.distinct_genre_values(),
        store.distinct_directors(),
        store.distinct_years(),
    )?;

    Ok(Facets {
        genres: genre_tokens(&genre_values),
        directors,
        years,
    })
}

/// Splits raw genre strings into deduplicated, sorted tags.
fn genre_tokens(values: &[String]) -> Vec<String> {
    let tokens: BTreeSet<String> = values
        .iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();

    tokens.into_iter().collect()
}
