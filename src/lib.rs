pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod git;
pub mod input;
pub mod logger;
pub mod shell;
pub mod task;
