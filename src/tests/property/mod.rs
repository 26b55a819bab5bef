//! Property-based tests for the filter-and-render core.

mod filter_props;
mod projection_props;
