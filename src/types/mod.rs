//! Common types shared by the REST client and the tools.

pub mod common;

pub use common::*;
