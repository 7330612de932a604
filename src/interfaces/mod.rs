//! Driving adapters: the HTTP API and the command-line entry points.

pub mod cli;
pub mod rest;
