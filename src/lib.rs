//! Code Quest API Library
//!
//! This library provides the core functionality for the Code Quest
//! hackathon registration and team management API, including domain
//! logic (the team partitioner), repositories, and infrastructure
//! components.

pub mod api;
pub mod domain;
pub mod infrastructure;
