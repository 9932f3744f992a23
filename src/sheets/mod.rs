//! Googleスプレッドシート連携

pub mod auth;
pub mod cell;
pub mod client;

pub use auth::{ServiceAccountAuth, ServiceAccountCredentials};
pub use cell::memo_cell;
pub use client::{SheetsApiError, SheetsClient};
