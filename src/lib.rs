//! Erlang C staffing engine for contact centres
//!
//! This crate estimates how many agents each forecast interval needs: it
//! derives the offered load in Erlangs from call volume and handle time,
//! searches for the smallest agent count meeting a service level target
//! under the Erlang C model, and inflates the result for shrinkage.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
