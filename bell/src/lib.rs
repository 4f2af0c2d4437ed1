//! # Bell 数計算用クレート
//!
//! Aitken's array (ベル三角形) を 1 行ずつ多倍長整数で構築し、 n 番目の Bell 数を求める。
//!
//! ## 利用例
//!
//! ```
//! use bell::{format, triangle};
//! let value = triangle::bell_number(15); // 15 番目の Bell 数
//! assert_eq!("1,382,958,545", format::format_exact(&value)); // 3 桁区切り
//! assert_eq!(Ok("1.38296e+09".to_string()), format::format_scientific(&value, 5)); // 指数表記
//! ```
pub mod cli;
pub mod format;
pub mod report;
pub mod triangle;

pub use triangle::{bell_number, compute, CancelToken, Outcome};
