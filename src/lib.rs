pub mod app;
pub mod cli;
pub mod config;
pub mod loader;
pub mod output;
pub mod pagination;
pub mod posts;

#[cfg(test)]
mod tests;
