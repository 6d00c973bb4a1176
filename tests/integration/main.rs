//! Integration tests

mod batch_test;
mod directive_test;
mod e2e_test;
mod engine_test;
mod support;
