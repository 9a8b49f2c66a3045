//! customtex - LaTeX project generator
//!
//! Builds LaTeX projects from templates written in a small tag language
//! (variables, multi-option choices and nested blocks), asking only for the
//! answers that are not already known.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::CustomTexError;
