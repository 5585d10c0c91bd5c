//! クイズコンテンツサービスへのアクセス実装
//!
//! ## 実装
//!
//! - `http`: JSON over HTTP でサービスを呼び出す実装

pub mod http;

pub use http::HttpQuizContentClient;
