//! Integration tests

mod cache_tests;
mod gateway_tests;
mod rate_limit_tests;
mod redis_tests;
