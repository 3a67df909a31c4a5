//! Property-based tests for the labelling pipeline.
//!
//! Checks every execution strategy against a sequential flood-fill oracle,
//! validates the structural guarantees of the output (background cells stay
//! at zero, labels are dense, duplicate pairs are harmless) and looks for
//! scheduling-dependent output across repeated and chunked runs.

mod concurrency;
mod equivalence;
mod oracle;
mod strategies;
mod structural;
mod types;
