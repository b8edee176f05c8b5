//======---------------------------------------------------------------======//
//                                                                           //
// Copyright 2022-2023 Evan Cox <evanacox00@gmail.com>. All rights reserved. //
//                                                                           //
// Use of this source code is governed by a BSD-style license that can be    //
// found in the LICENSE.txt file at the root of this project, or at the      //
// following link: https://opensource.org/licenses/BSD-3-Clause              //
//                                                                           //
//======---------------------------------------------------------------======//

use std::fmt::Debug;

/// Models a type that can act as a key for [`ArenaMap`](crate::arena::ArenaMap).
///
/// Prefer the [`arena_key`](crate::arena_key) macro over implementing this
/// by hand, it provides `Debug`/`Hash`/serde impls that match every other key.
pub trait ArenaKey: Copy + Eq + Debug {
    /// Creates a new key from a given arena index.
    ///
    /// Panics if `index` cannot be represented by the key's storage type, this
    /// keeps overflowing indices from silently aliasing other entities.
    fn new(index: usize) -> Self;

    /// Converts the key back into the arena index it was created from.
    fn index(self) -> usize;
}

/// Creates a type-safe key for an [`ArenaMap`](crate::arena::ArenaMap).
///
/// Keys are stored as a `u32`, MIR bodies never get anywhere close to that
/// many blocks or functions.
///
/// ```
/// # use miri::arena_key;
/// # use miri::arena::ArenaMap;
/// arena_key! {
///     /// We can have doc comments!
///     pub struct EntityRef;
/// }
///
/// type EntityMap<V> = ArenaMap<EntityRef, V>;
/// ```
#[macro_export(local_inner_macros)]
macro_rules! arena_key {
    ( $(#[$outer:meta])* $vis:vis struct $name:ident; $($rest:tt)* ) => {
        $(#[$outer])*
        #[repr(transparent)]
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[cfg_attr(feature = "enable-serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(u32);

        impl $crate::arena::ArenaKey for $name {
            #[inline]
            fn new(index: usize) -> Self {
                use std::convert::TryInto;

                Self(index.try_into().expect("index is not representable with key type"))
            }

            #[inline]
            fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
                std::write!(f, "{}({})", std::stringify!($name), self.0)
            }
        }

        arena_key!($($rest)*);
    };

    () => {}
}

#[cfg(test)]
mod tests {
    use crate::arena::ArenaKey;

    arena_key! {
        struct First;
        struct Second;
    }

    #[test]
    fn keys_round_trip_index() {
        assert_eq!(First::new(0).index(), 0);
        assert_eq!(Second::new(17).index(), 17);
        assert_eq!(First::new(17), First::new(17));
        assert_ne!(First::new(3), First::new(4));
    }

    #[test]
    fn keys_debug_with_their_name() {
        assert_eq!(format!("{:?}", First::new(3)), "First(3)");
        assert_eq!(format!("{:?}", Second::new(9)), "Second(9)");
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    #[should_panic]
    fn oversized_index_panics() {
        let _ = First::new(usize::MAX);
    }
}
