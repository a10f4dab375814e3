pub mod classifier;
pub mod credentials;
pub mod engine;
pub mod history;
pub mod resolver;
