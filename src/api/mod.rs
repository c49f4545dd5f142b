pub mod attendance;
pub mod export;
pub mod pages;
