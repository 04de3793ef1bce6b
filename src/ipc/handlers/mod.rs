pub mod core;
pub mod ranking;
pub mod results;
pub mod scores;
