//! Tests for binding generation
