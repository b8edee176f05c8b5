//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use crate::arena::ArenaKey;
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::{fmt, slice};

#[cfg(feature = "enable-serde")]
use serde::{Deserialize, Serialize};

/// A primary mapping of `K -> V`, effectively a typed wrapper around `Vec<V>`.
///
/// Unlike a `Vec`, it can only be indexed with the correct key type, so a
/// block key can never accidentally index the function table.
///
/// ```
/// # use miri::arena_key;
/// # use miri::arena::ArenaMap;
/// arena_key! {
///     struct Name;
/// }
///
/// let mut blocks = ArenaMap::new();
/// let bb: Name = blocks.insert("Hello!");
///
/// assert_eq!(blocks[bb], "Hello!");
/// ```
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub struct ArenaMap<K: ArenaKey, V> {
    slots: Vec<V>,
    _unused: PhantomData<fn() -> K>,
}

impl<K: ArenaKey, V> ArenaMap<K, V> {
    /// Creates a new, empty arena.
    #[inline]
    pub fn new() -> Self {
        Self {
            slots: Vec::default(),
            _unused: PhantomData,
        }
    }

    /// Checks if the arena contains a given key, i.e. whether a given key
    /// has been returned from [`Self::insert`] at some point.
    ///
    /// ```
    /// # use miri::arena_key;
    /// # use miri::arena::*;
    /// # arena_key! { struct Key; }
    /// let mut map = ArenaMap::default();
    /// let k1: Key = map.insert(true);
    /// let k2 = map.next_key();
    /// assert_eq!(map.contains(k1), true);
    /// assert_eq!(map.contains(k2), false);
    /// ```
    #[inline]
    pub fn contains(&self, key: K) -> bool {
        key.index() < self.slots.len()
    }

    /// Gets the value associated with a key, or `None` if the key is not
    /// from this arena.
    #[inline]
    pub fn get(&self, key: K) -> Option<&V> {
        self.slots.get(key.index())
    }

    /// Mutable version of [`Self::get`].
    #[inline]
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.slots.get_mut(key.index())
    }

    /// Adds an item into the arena, and returns a key that can be used to
    /// access that data later.
    #[inline]
    pub fn insert(&mut self, value: V) -> K {
        self.slots.push(value);

        K::new(self.slots.len() - 1)
    }

    /// Gets the key that *will be* returned by [`Self::insert`] when it's
    /// called next. This key is not valid until that call occurs.
    #[inline]
    pub fn next_key(&self) -> K {
        K::new(self.slots.len())
    }

    /// Gets the number of elements that have been pushed into the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Checks if the arena has had any elements pushed into it.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterates over the valid keys in increasing order.
    pub fn keys(&self) -> impl Iterator<Item = K> + DoubleEndedIterator + ExactSizeIterator {
        (0..self.slots.len()).map(K::new)
    }

    /// Iterates over the values in key order.
    pub fn values(&self) -> slice::Iter<'_, V> {
        self.slots.iter()
    }

    /// Iterates over `(key, &value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> + DoubleEndedIterator + ExactSizeIterator {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, v)| (K::new(i), v))
    }

    /// Iterates over `(key, &mut value)` pairs in key order.
    pub fn iter_mut(
        &mut self,
    ) -> impl Iterator<Item = (K, &mut V)> + DoubleEndedIterator + ExactSizeIterator {
        self.slots
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (K::new(i), v))
    }
}

impl<K: ArenaKey, V> Default for ArenaMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ArenaKey, V> FromIterator<V> for ArenaMap<K, V> {
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        Self {
            slots: Vec::from_iter(iter),
            _unused: PhantomData,
        }
    }
}

impl<K: ArenaKey, V> Index<K> for ArenaMap<K, V> {
    type Output = V;

    #[inline]
    fn index(&self, key: K) -> &V {
        &self.slots[key.index()]
    }
}

impl<K: ArenaKey, V> IndexMut<K> for ArenaMap<K, V> {
    #[inline]
    fn index_mut(&mut self, key: K) -> &mut V {
        &mut self.slots[key.index()]
    }
}

impl<K: ArenaKey, V: Debug> Debug for ArenaMap<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ArenaMap ")?;

        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena_key;

    arena_key! {
        struct Key;
    }

    #[test]
    fn insert_and_index() {
        let mut map = ArenaMap::new();
        let k1: Key = map.insert("first");
        let k2 = map.insert("second");

        assert_eq!(map[k1], "first");
        assert_eq!(map[k2], "second");
        assert_eq!(map.len(), 2);

        map[k1] = "changed";

        assert_eq!(map.get(k1), Some(&"changed"));
    }

    #[test]
    fn next_key_becomes_valid() {
        let mut map = ArenaMap::<Key, i32>::default();
        let next = map.next_key();

        assert!(map.is_empty());
        assert!(!map.contains(next));

        let inserted = map.insert(5);

        assert_eq!(next, inserted);
        assert!(map.contains(next));
    }

    #[test]
    fn iteration_is_in_key_order() {
        let map: ArenaMap<Key, char> = "abc".chars().collect();
        let keys: Vec<Key> = map.keys().collect();
        let pairs: Vec<(Key, char)> = map.iter().map(|(k, v)| (k, *v)).collect();

        assert_eq!(keys, vec![Key::new(0), Key::new(1), Key::new(2)]);
        assert_eq!(pairs[2], (Key::new(2), 'c'));
        assert_eq!(map.keys().rev().next(), Some(Key::new(2)));
    }
}
