pub mod indicators;

pub use indicators::IndicatorExtractor;
