pub mod ranking;
pub mod tendency;
