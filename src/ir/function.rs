//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::ir::Body;

#[cfg(feature = "enable-serde")]
use serde::{Deserialize, Serialize};

/// The attribute that marks a function as something `miri` should run.
pub const MIRI_RUN: &str = "miri_run";

/// The argument to [`MIRI_RUN`] that holds the expected result.
pub const EXPECTED: &str = "expected";

/// An attribute attached to a function, e.g. `#[miri_run(expected = "Int(3)")]`.
///
/// Only `key = "value"` arguments are supported.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub struct Attribute {
    name: String,
    args: Vec<(String, String)>,
}

impl Attribute {
    /// Creates an attribute with no arguments.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            args: Vec::default(),
        }
    }

    /// Adds a `key = "value"` argument.
    pub fn with_arg(mut self, key: &str, value: &str) -> Self {
        self.args.push((key.to_owned(), value.to_owned()));

        self
    }

    /// The name of the attribute, e.g. `miri_run`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Checks whether the attribute has a given name.
    pub fn check_name(&self, name: &str) -> bool {
        self.name == name
    }

    /// The arguments, in the order they were written.
    pub fn args(&self) -> &[(String, String)] {
        &self.args
    }

    /// Finds the value of the first argument named `key`.
    pub fn value_str(&self, key: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A single function: its name, attributes and MIR body.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub struct Function {
    name: String,
    attrs: Vec<Attribute>,
    body: Body,
}

impl Function {
    pub(in crate::ir) fn new(name: String, attrs: Vec<Attribute>) -> Self {
        Self {
            name,
            attrs,
            body: Body::default(),
        }
    }

    /// The name of the function.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every attribute on the function.
    pub fn attrs(&self) -> &[Attribute] {
        &self.attrs
    }

    /// Finds the first attribute with a given name.
    pub fn find_attr(&self, name: &str) -> Option<&Attribute> {
        self.attrs.iter().find(|attr| attr.check_name(name))
    }

    /// Whether the function is marked with `#[miri_run]`.
    pub fn is_start_point(&self) -> bool {
        self.find_attr(MIRI_RUN).is_some()
    }

    /// The MIR body of the function.
    pub fn body(&self) -> &Body {
        &self.body
    }

    pub(in crate::ir) fn set_body(&mut self, body: Body) {
        self.body = body;
    }
}
