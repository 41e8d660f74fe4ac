//! Unit tests for `Bind` derive parsing.
