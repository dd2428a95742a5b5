pub mod ai;
pub mod git;
pub mod review;
