//! Core types and logic for uitap.
//!
//! This crate provides the pure half of an Android UI automation engine:
//! snapshot decoding, element matching, and coordinate resolution. It has
//! no device I/O; the CLI crate supplies the adb shell and the snapshot
//! puller and drives these pieces.
//!
//! # Modules
//!
//! - [`geometry`]: bounds parsing and center-point resolution
//! - [`tree`]: accessibility-tree snapshot decoding
//! - [`matcher`]: case-insensitive keyword matching against nodes
//! - [`locator`]: deterministic first-match pre-order search
//! - [`outcome`]: typed search and action outcomes
//!
//! # Search semantics
//!
//! A node qualifies as a match when any keyword is a case-insensitive
//! substring of its `text` or `content-desc` AND it carries parsable
//! bounds. The locator walks the tree pre-order and the first qualifying
//! node wins, which keeps tap targets reproducible across runs of the
//! same screen.

pub mod geometry;
pub mod locator;
pub mod matcher;
pub mod outcome;
pub mod tree;
