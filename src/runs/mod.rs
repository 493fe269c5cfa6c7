//! Test run identity.
//!
//! Every execution of a test writes one capture file. The filename carries
//! a timestamp, the test name and (optionally) the browser/shard it ran on.
//! This module turns those filenames back into the stable test identity
//! shared by all repeated executions.

pub mod stable_name;

pub use stable_name::{
    parse_test_run, parse_test_run_with_extension, stable_test_name, RunParameters, TestRun,
};
