//! Display formatting helpers.

pub mod num;

pub use num::group_digits;
