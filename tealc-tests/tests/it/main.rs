//! Integration test harness for the TealC compiler.

mod invalid_programs;
mod valid_programs;
