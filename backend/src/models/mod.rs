pub mod booking;
pub mod date_range;
pub mod day;

pub use booking::*;
pub use date_range::*;
pub use day::*;
