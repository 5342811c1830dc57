//! Security Audit Test Suite for snk-core
//!
//! Adversarial inputs for every entry point that reads untrusted key
//! material. Key files and public-key strings come from project files that
//! an attacker may control; none of these inputs may panic, allocate without
//! bound, or be accepted.
//!
//! ## Test Categories
//!
//! - **malformed_blobs**: corrupted headers, hostile length fields, mutation sweeps
//! - **key_file_attacks**: oversized, truncated and substituted key files

mod key_file_attacks;
mod malformed_blobs;
