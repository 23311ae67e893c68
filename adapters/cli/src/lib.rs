#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless session plumbing for the Garden Defence command-line adapter.

pub mod session;
pub mod settings;
