pub mod resolve;
pub mod util;

pub use resolve::*;
pub use util::*;
