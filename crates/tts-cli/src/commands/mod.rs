pub mod batch;
pub mod classify;
pub mod completions;
pub mod config;
pub mod evaluate;
pub mod util;
pub mod validate;
