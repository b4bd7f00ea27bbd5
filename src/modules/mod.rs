//! Modules layer - Infrastructure components
//!
//! Contains adapters for resources outside the relational store,
//! currently the local-filesystem upload tree.

pub mod uploads;
