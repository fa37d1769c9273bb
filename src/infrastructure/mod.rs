pub mod rendering;
pub mod services;
pub mod webgl;

pub use services::{BrowserTimeProvider, ConsoleLogger};
