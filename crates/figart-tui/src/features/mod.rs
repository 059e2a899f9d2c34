//! Feature slices of the generator screen.

pub mod copy;
pub mod form;
pub mod output;
