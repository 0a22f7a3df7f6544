pub mod catalog;
pub mod dashboard;
pub mod facets;
pub mod reviews;
pub mod watchlist;
