// ABOUTME: Module root for text presenters (fixed-width table and single-record detail view).
// ABOUTME: Re-exports the render functions for convenient access.

pub mod detail;
pub mod table;

pub use detail::render_detail;
pub use table::{TABLE_WIDTH, render_table};
