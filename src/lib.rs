//! Box scores, line scores and spray charts folded from recorded game stats.

pub mod reports;
pub mod util;
