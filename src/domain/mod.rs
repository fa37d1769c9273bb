pub mod benchmark;
pub mod errors;
pub mod logging;
pub mod texture;
pub mod timing;
