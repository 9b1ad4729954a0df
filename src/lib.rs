pub mod app;
pub mod cli;
pub mod clock;
pub mod config;
pub mod country;
pub mod fetch;
pub mod output;
pub mod page;
pub mod render;
pub mod utils;

#[cfg(test)]
mod tests;
