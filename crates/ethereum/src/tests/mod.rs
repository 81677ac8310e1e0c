//! Behaviour tests against a mocked chain backend

mod contract_tests;
mod iterator_tests;
mod mock_backend;
mod watch_tests;
