//! Pure detector families. Every function in here reads one `PageSnapshot`
//! and returns typed findings; nothing performs I/O.

pub mod marketing;
pub mod seo;
pub mod technical;
pub mod ux;
pub mod vendors;
