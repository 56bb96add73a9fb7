//! seedgrow-filter - Input conditioning filters
//!
//! Rank (order-statistic) filtering of 8 bpp intensity grids, used to
//! suppress impulse noise before region growing.

mod error;
pub mod rank;

pub use error::{FilterError, FilterResult};
pub use rank::{median_filter, rank_filter_gray};
