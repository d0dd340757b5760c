//! Cross-module test suite for the sky almanac binary.
