//! tuiman - a terminal HTTP request composer and runner
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod input;
pub mod models;
pub mod startup;
pub mod storage;
pub mod terminal;
pub mod traits;
pub mod ui;
