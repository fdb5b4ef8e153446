//! Unit test modules.

mod history_store_test;
