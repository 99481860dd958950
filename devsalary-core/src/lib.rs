#![doc = "devsalary-core: core logic library for devsalary."]

//! This crate contains the fetch, normalise and aggregate pipeline behind devsalary.
//! Rendering and command-line handling live in the `devsalary` binary crate.
//!
//! # Usage
//! Build a fetcher from [`fetch`], hand it to [`pipeline::collect_statistics`]
//! together with a language list, and consume the resulting
//! [`contract::PlatformResultSet`].

pub mod config;
pub mod contract;
pub mod fetch;
pub mod pipeline;
pub mod salary;
pub mod statistics;
