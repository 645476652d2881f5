//! Scenario configuration, faction registry, and scripted playback for Warband.
//!
//! This crate wraps the pure token logic of `warband-tokens` with the parts
//! a host needs to drive it: a YAML scenario format, a [`Theater`] holding
//! every faction of a session, and a sequential script player that feeds
//! explicit time points and events into the theater.
//!
//! # Modules
//!
//! - [`config`] -- Scenario loading from YAML into strongly-typed structs.
//! - [`error`] -- [`TheaterError`] for registry lookups and scenario assembly.
//! - [`script`] -- [`ScriptStep`] playback via [`run_script`].
//! - [`theater`] -- [`Theater`], the per-session faction registry.
//!
//! [`Theater`]: theater::Theater
//! [`TheaterError`]: error::TheaterError
//! [`ScriptStep`]: script::ScriptStep
//! [`run_script`]: script::run_script

pub mod config;
pub mod error;
pub mod script;
pub mod theater;
