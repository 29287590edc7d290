use std::hash::Hash;

/// Represents a newtype wrapper used to index into a Vec or a slice.
///
/// You can use the [`newtype_index!`](crate::newtype_index) macro to define one.
pub trait Idx: Copy + PartialEq + Eq + Hash + std::fmt::Debug + 'static {
    fn new(value: usize) -> Self;

    fn index(self) -> usize;
}

/// Defines a `u32`-backed index type that implements [`Idx`].
///
/// ```ignore
/// newtype_index! {
///     pub struct BlockId;
/// }
/// ```
#[macro_export]
macro_rules! newtype_index {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis struct $name(u32);

        impl $name {
            #[inline]
            pub const fn from_u32(value: u32) -> Self {
                Self(value)
            }

            #[inline]
            pub const fn as_u32(self) -> u32 {
                self.0
            }
        }

        impl $crate::Idx for $name {
            #[inline]
            #[allow(clippy::cast_possible_truncation)]
            fn new(value: usize) -> Self {
                assert!(value <= u32::MAX as usize, "index overflows u32");
                Self(value as u32)
            }

            #[inline]
            fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::Idx;

    crate::newtype_index! {
        struct TestId;
    }

    #[test]
    fn round_trips_usize() {
        let id = TestId::new(42);
        assert_eq!(id.index(), 42);
        assert_eq!(id.as_u32(), 42);
        assert_eq!(format!("{id:?}"), "TestId(42)");
    }

    #[test]
    fn orders_by_value() {
        assert!(TestId::from_u32(1) < TestId::from_u32(2));
    }
}
