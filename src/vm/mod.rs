//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

//! Provides APIs for the execution of MIR.
//!
//! This module defines the abstract interface of an "engine" that executes
//! some given MIR, and the interpreter that implements it.

mod config;
mod engine;
mod error;
mod frame;
mod interpreter;
mod value;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use frame::*;
pub use interpreter::*;
pub use value::*;
