pub mod indicator;
pub mod report;
pub mod reputation;
pub mod verdict;

pub use indicator::*;
pub use report::*;
pub use reputation::*;
pub use verdict::*;
