//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain. Only REST is exposed.

pub mod rest;
