//! Integration tests for the content service.

mod lifecycle;
mod persistence;
mod precedence;
mod properties;
mod revert_reset;
