//! A library for driving project generation, builds and documentation
//! of the lw_index_datastructs C/C++ library.
//!
//! The library wraps the external CMake and Doxygen tools: it selects
//! per-OS tool locations from a config file, exports the environment
//! the CMake scripts expect, and runs the requested actions in a fixed
//! order, aborting on the first failing tool.
//!
//! The library uses a config_build.toml file to configure the project.
//!

/// Contains the implementations behind each CLI action
pub mod commands;
/// Handles global config
pub mod global_cfg;
/// Contains hashing related functions
pub mod hasher;
/// Contains config parse related functions
pub mod parser;
/// Contains git metadata helpers
pub mod vcs;
/// Contains logger, environment config and process execution
pub mod utils;

#[macro_use]
extern crate lazy_static;
