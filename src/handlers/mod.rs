//! HTTP handlers for the students resource.

pub mod students;
