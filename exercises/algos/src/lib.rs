//! Pure algorithmic exercises behind a uniform interface.
//!
//! Each module holds one stateless routine and its tests; the binary in
//! `main.rs` is a thin dispatcher over them. None of the routines perform
//! I/O or share state.

use thiserror::Error;

pub mod closest_pair;
pub mod hashtags;
pub mod kth_product;
pub mod measurements;
pub mod network_cost;
pub mod package_routes;
pub mod rewards;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlgoError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub use closest_pair::closest_lexicographical_pair;
pub use hashtags::top_hashtags;
pub use kth_product::kth_smallest_product;
pub use measurements::min_measurements;
pub use network_cost::min_total_cost;
pub use package_routes::min_roads_to_collect;
pub use rewards::min_rewards;
