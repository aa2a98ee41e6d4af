//! Common test utilities for georegion.
//!
//! This module provides shared utilities for testing the georegion server.

// Not every test binary uses every helper
#![allow(dead_code)]

pub mod assertions;
pub mod http_client;
pub mod test_data;
