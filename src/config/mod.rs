//! Configuration model for dsl-exec.
//!
//! This module defines the Config struct that represents `dsl-exec.yaml`.
//! The file is optional. It supports forward-compatible YAML parsing (unknown
//! fields are ignored), defaults for every field, and validation of values.

mod model;
mod operations;


pub use model::{Config, DEFAULT_CONFIG_FILE};
