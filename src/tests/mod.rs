//! Cross-module test suites.

mod property;
