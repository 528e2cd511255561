//! Request extractors whose rejections use the [`AppError`](crate::AppError) envelope.

pub mod json_body;

pub use json_body::JsonBody;
