pub mod chart;
pub mod projection;
pub mod solve;
