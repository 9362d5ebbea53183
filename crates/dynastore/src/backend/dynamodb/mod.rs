//! DynamoDB backend implementation.
//!
//! Renders request trees into DynamoDB expressions and dispatches them with
//! `aws-sdk-dynamodb`.

mod backend;
mod conversions;
mod error;
mod expression;

pub use backend::DynamoDbBackend;
