pub mod filter;
pub mod identity;
pub mod movie;
pub mod review;

pub use filter::{FilterParams, MovieFilter};
pub use identity::{Identity, SessionId};
pub use movie::Movie;
pub use review::{NewReview, Review};
