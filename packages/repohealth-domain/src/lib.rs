pub mod filter;
pub mod narrative;
pub mod query;
pub mod rank;
pub mod score;
pub mod signals;
