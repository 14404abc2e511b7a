//! Core types and definitions for the horde simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, decisions, configuration, player snapshots, attack queries,
//! events, state snapshots, and tuning constants.
//! It has no dependency on the ECS runtime or any frontend.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod decision;
pub mod enums;
pub mod error;
pub mod events;
pub mod players;
pub mod state;
pub mod types;
