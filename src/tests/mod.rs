//! Cross-module tests for generation and parsing


mod config_tests;
mod sequence_tests;
