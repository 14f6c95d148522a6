//! chart-sync - propagate upstream releases into Helm chart repositories
//!
//! The pipeline runs in four strictly ordered stages:
//! 1. [`release`] - resolve the release tag and its notes
//! 2. [`repo`] - acquire a working copy of the chart repository
//! 3. [`chart`] - bump the chart version, image tags and changelog
//! 4. [`propose`] - branch, commit, push and open a pull request
//!
//! [`pipeline::run_pipeline`] wires the stages together.

pub mod auth;
pub mod chart;
pub mod error;
pub mod pipeline;
pub mod platform;
pub mod propose;
pub mod release;
pub mod repo;
pub mod types;
