//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

#![deny(
    unreachable_pub,
    missing_docs,
    missing_abi,
    rust_2018_idioms,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links
)]

//! # miri
//!
//! An interpreter for Rust's mid-level IR. MIR is read from a textual
//! format, verified, and then every function marked `#[miri_run]` is
//! executed and checked against the value it's expected to produce.
//!
//! ```
//! use miri::harness::interpret_start_points;
//! use miri::vm::InterpreterConfig;
//!
//! let module = miri::parse_mir("doc", r#"
//!     #[miri_run(expected = "Int(6)")]
//!     fn six() {
//!         bb0: {
//!             return = Mul(const 2, const 3);
//!             return;
//!         }
//!     }
//! "#).unwrap();
//!
//! let report = interpret_start_points(&module, InterpreterConfig::default());
//!
//! assert!(report.success());
//! assert_eq!(report.to_string(), "Interpreting: six\nTest passed!\n\n");
//! ```

pub mod analysis;
pub mod arena;
pub mod harness;
pub mod ir;
pub mod reader;
pub mod utility;
pub mod vm;

#[cfg(feature = "dev-tools")]
pub mod cli;

pub use reader::{parse_mir, ReadError};
