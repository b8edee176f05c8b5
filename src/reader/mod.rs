//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

//! A hand-written lexer and parser for textual MIR.
//!
//! Every module that comes out of [`parse_mir`] has already been run through
//! the verifier, so the interpreter never has to deal with dangling block or
//! local references.

mod errors;
mod lex;
mod parse;

pub use errors::*;
pub use lex::*;
pub use parse::*;
