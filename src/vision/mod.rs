//! Vision対応モデルによるテキスト抽出

mod client;

pub use client::VisionClient;
