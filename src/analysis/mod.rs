//! Analysis modules.
//!
//! Pure functions over a review slice: sentiment statistics, keyword
//! frequencies, and grouping for display.

pub mod grouping;
pub mod keywords;
pub mod sentiment;

pub use grouping::*;
pub use keywords::*;
pub use sentiment::*;
