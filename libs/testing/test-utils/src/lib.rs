//! Shared test utilities for domain testing
//!
//! Provides `TestMongo`: a MongoDB container with a throwaway database
//! per test, cleaned up when the struct is dropped.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::TestMongo;
//!
//! #[tokio::test]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let db = mongo.database();
//!     // run repository code against db
//! }
//! ```

mod mongo;

pub use mongo::TestMongo;
