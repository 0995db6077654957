//! This crate implements the storage-independent model for a git repository:
//! the error vocabulary shared by every repository implementation and the
//! git config file format.

#![deny(warnings)]

pub mod config;
pub mod repo;
