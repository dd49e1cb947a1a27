pub mod patterns;
pub mod scanner;

pub use scanner::PatternDetector;
