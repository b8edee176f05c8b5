//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::arena::ArenaMap;
use crate::ir::{Attribute, Func, FuncBuilder, Function};
use crate::utility::SaHashMap;

#[cfg(feature = "enable-serde")]
use serde::{Deserialize, Serialize};

/// Contains all the data for a single file of MIR.
///
/// Functions are kept in the order they were declared in, and can be looked
/// up by name.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub struct Module {
    name: String,
    functions: ArenaMap<Func, Function>,
    names: SaHashMap<String, Func>,
}

impl Module {
    /// Creates a new, empty module with a given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            functions: ArenaMap::default(),
            names: SaHashMap::default(),
        }
    }

    /// The name the module was created with, usually a file path.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolves a [`Func`] into a real function object.
    pub fn function(&self, func: Func) -> &Function {
        &self.functions[func]
    }

    /// Resolves a [`Func`] into a real function object, if it is actually
    /// from this module.
    pub fn get_function(&self, func: Func) -> Option<&Function> {
        self.functions.get(func)
    }

    /// Finds a [`Func`] with a given name.
    pub fn find_function_by_name(&self, name: &str) -> Option<Func> {
        self.names.get(name).copied()
    }

    /// Declares a function without giving it a body. It can be defined
    /// later with [`Self::define_existing_function`].
    ///
    /// Names must be unique, redeclaring a name is a logic error.
    pub fn declare_function(&mut self, name: &str, attrs: Vec<Attribute>) -> Func {
        debug_assert!(self.find_function_by_name(name).is_none());

        let func = self
            .functions
            .insert(Function::new(name.to_owned(), attrs));

        self.names.insert(name.to_owned(), func);

        func
    }

    /// Declares and then defines a new function taking `num_args` arguments.
    pub fn define_function(
        &mut self,
        name: &str,
        attrs: Vec<Attribute>,
        num_args: u32,
    ) -> FuncBuilder<'_> {
        let func = self.declare_function(name, attrs);

        self.define_existing_function(func, num_args)
    }

    /// Returns a [`FuncBuilder`] that will create a body for a previously-declared
    /// function. Any existing body is replaced when the builder finishes.
    pub fn define_existing_function(&mut self, func: Func, num_args: u32) -> FuncBuilder<'_> {
        FuncBuilder::new(self, func, num_args)
    }

    pub(in crate::ir) fn function_mut(&mut self, func: Func) -> &mut Function {
        &mut self.functions[func]
    }

    /// Every function in the module, in declaration order.
    pub fn functions(&self) -> impl Iterator<Item = Func> + '_ {
        self.functions.keys()
    }

    /// Every function in the module alongside its key, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Func, &Function)> {
        self.functions.iter()
    }

    /// The number of functions in the module.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether the module has no functions.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
