use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::Movie;

/// Raw, untrusted filter values exactly as they arrive in a query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    pub search: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub year: Option<String>,
}

/// Composable catalog predicates. Supplied predicates are ANDed together;
/// absent ones are no-ops, so the empty filter selects the whole catalog.
///
/// Both the full-page listing and the partial re-render path are driven by
/// this one type, which keeps their result sets identical by construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieFilter {
    /// Case-insensitive substring on the title.
    pub search: Option<String>,
    /// Case-insensitive substring on the raw genre field, not the split
    /// tags: "Com" matches "Comedy, Drama".
    pub genre: Option<String>,
    /// Exact director match, collation of the backing store.
    pub director: Option<String>,
    /// Exact release year.
    pub year: Option<i32>,
}

impl MovieFilter {
    /// Parses raw query values. Empty strings count as absent (an empty
    /// control submits an empty value, not no value); a non-empty year
    /// that is not an integer is rejected rather than ignored.
    pub fn parse(params: FilterParams) -> AppResult<Self> {
        let year = match non_empty(params.year) {
            Some(raw) => Some(raw.parse::<i32>().map_err(|_| {
                AppError::InvalidInput(format!("Year must be an integer, got '{raw}'"))
            })?),
            None => None,
        };

        Ok(Self {
            search: non_empty(params.search),
            genre: non_empty(params.genre),
            director: non_empty(params.director),
            year,
        })
    }

    /// In-process predicate evaluation. The Postgres backend expresses the
    /// same semantics in SQL (ILIKE substring, exact equality); the two
    /// must stay in agreement.
    pub fn matches(&self, movie: &Movie) -> bool {
        if let Some(search) = &self.search {
            if !contains_ignore_case(&movie.title, search) {
                return false;
            }
        }
        if let Some(genre) = &self.genre {
            // A movie with no genre never matches an active genre filter.
            let matched = movie
                .genre
                .as_deref()
                .is_some_and(|raw| contains_ignore_case(raw, genre));
            if !matched {
                return false;
            }
        }
        if let Some(director) = &self.director {
            if movie.director != *director {
                return false;
            }
        }
        if let Some(year) = self.year {
            if movie.year != year {
                return false;
            }
        }
        true
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(
        search: Option<&str>,
        genre: Option<&str>,
        director: Option<&str>,
        year: Option<&str>,
    ) -> FilterParams {
        FilterParams {
            search: search.map(str::to_string),
            genre: genre.map(str::to_string),
            director: director.map(str::to_string),
            year: year.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_absent_params_yields_empty_filter() {
        let filter = MovieFilter::parse(FilterParams::default()).unwrap();
        assert_eq!(filter, MovieFilter::default());
    }

    #[test]
    fn test_parse_empty_strings_are_no_ops() {
        let filter = MovieFilter::parse(params(Some(""), Some(""), Some(""), Some(""))).unwrap();
        assert_eq!(filter, MovieFilter::default());
    }

    #[test]
    fn test_parse_year() {
        let filter = MovieFilter::parse(params(None, None, None, Some("1979"))).unwrap();
        assert_eq!(filter.year, Some(1979));
    }

    #[test]
    fn test_parse_rejects_non_numeric_year() {
        let err = MovieFilter::parse(params(None, None, None, Some("not-a-number"))).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let movie = Movie::new(1, "The Matrix", Some("Sci-Fi"), "Lana Wachowski", 1999);
        let filter = MovieFilter {
            search: Some("matr".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&movie));

        let filter = MovieFilter {
            search: Some("reloaded".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&movie));
    }

    #[test]
    fn test_genre_matches_raw_field_not_split_tags() {
        let movie = Movie::new(1, "Annie Hall", Some("Comedy, Romance"), "Woody Allen", 1977);
        let filter = MovieFilter {
            genre: Some("com".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&movie));

        // Substring crossing the delimiter also matches, by design of the
        // raw-field comparison.
        let filter = MovieFilter {
            genre: Some("y, rom".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&movie));
    }

    #[test]
    fn test_genre_filter_excludes_untagged_movies() {
        let movie = Movie::new(1, "Untagged", None, "Nobody", 2001);
        let filter = MovieFilter {
            genre: Some("com".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&movie));
    }

    #[test]
    fn test_director_match_is_exact_and_case_sensitive() {
        let movie = Movie::new(1, "Alien", Some("Horror"), "Ridley Scott", 1979);
        let exact = MovieFilter {
            director: Some("Ridley Scott".to_string()),
            ..Default::default()
        };
        assert!(exact.matches(&movie));

        let wrong_case = MovieFilter {
            director: Some("ridley scott".to_string()),
            ..Default::default()
        };
        assert!(!wrong_case.matches(&movie));

        let partial = MovieFilter {
            director: Some("Ridley".to_string()),
            ..Default::default()
        };
        assert!(!partial.matches(&movie));
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let movie = Movie::new(1, "Alien", Some("Horror, Sci-Fi"), "Ridley Scott", 1979);
        let matching = MovieFilter {
            search: Some("ali".to_string()),
            genre: Some("sci".to_string()),
            director: Some("Ridley Scott".to_string()),
            year: Some(1979),
        };
        assert!(matching.matches(&movie));

        let one_off = MovieFilter {
            year: Some(1980),
            ..matching
        };
        assert!(!one_off.matches(&movie));
    }
}
