//! API integration tests.
//!
//! Every test builds the full application against the database named by
//! `SHELF_TEST_DATABASE_URL` and drives it through the router. When the
//! variable is unset the whole suite is skipped.

mod helpers;

mod auth_test;
mod folder_test;
mod link_test;
mod search_test;
mod share_test;
