//! Cross-module tests for the pricing pipeline.
