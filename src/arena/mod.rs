//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

//! A simple typed arena module.
//!
//! Arenas do not allow deletion, a key stays valid for the lifetime of the
//! arena it came from. Functions in a [`Module`](crate::ir::Module) and blocks in a
//! [`Body`](crate::ir::Body) are both stored this way.
//!
//! ```
//! # use miri::arena_key;
//! # use miri::arena::*;
//! arena_key! {
//!     pub struct Node;
//! }
//!
//! enum AstNode {
//!     Immediate(u64),
//!     Add(Node, Node),
//! }
//!
//! let mut arena = ArenaMap::new();
//!
//! let e1: Node = arena.insert(AstNode::Immediate(16));
//! let e2 = arena.insert(AstNode::Immediate(3));
//! let e3 = arena.insert(AstNode::Add(e1, e2));
//! ```

mod key;
mod map;

pub use key::ArenaKey;
pub use map::ArenaMap;
