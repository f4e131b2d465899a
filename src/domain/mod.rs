pub mod findings;
pub mod report;
pub mod snapshot;

pub use findings::*;
pub use report::*;
pub use snapshot::*;
