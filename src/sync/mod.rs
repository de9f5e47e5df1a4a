pub mod debounce;
pub mod mirror;
pub mod payload;
pub mod transport;
pub mod worker;
