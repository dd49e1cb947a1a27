pub mod truncation;

pub use truncation::truncate_indicator;
