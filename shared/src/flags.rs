use num_traits::{One, PrimInt};

/// Trait implemented by flag enums declared with [`define_flags!`].
///
/// The enum discriminant is the bit index; `Storage` is the integer the flags pack into.
pub trait FlagBit: Copy {
    type Storage: PrimInt;

    fn bit_index(self) -> u8;

    fn mask(self) -> Self::Storage {
        // NOTE: `bit_index()` must be < the bit width of `Storage`.
        Self::Storage::one() << (self.bit_index() as usize)
    }
}

/// Packed set of flags, e.g. the movement flags carried by every passenger.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub struct Flags<T: PrimInt> {
    pub bits: T,
}

impl<T: PrimInt> Flags<T> {
    pub fn new(bits: T) -> Self {
        Self { bits }
    }

    pub fn add<U: FlagBit<Storage = T>>(&mut self, flag: U) {
        self.bits = self.bits | flag.mask();
    }

    pub fn remove<U: FlagBit<Storage = T>>(&mut self, flag: U) {
        self.bits = self.bits & !flag.mask();
    }

    pub fn has<U: FlagBit<Storage = T>>(&self, flag: U) -> bool {
        (self.bits & flag.mask()) != T::zero()
    }

    pub fn is_empty(&self) -> bool {
        self.bits == T::zero()
    }
}

/// Declare a flag enum and implement [`FlagBit`] for it.
///
/// ```rust
/// shared::define_flags!(SeatFlag, u8, {
///     Boarded,
///     Mounted,
/// });
/// ```
#[macro_export]
macro_rules! define_flags {
    ($name:ident, $storage:ty, { $($(#[$meta:meta])* $variant:ident),* $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[repr(u8)]
        pub enum $name {
            $($(#[$meta])* $variant),*
        }

        impl $crate::flags::FlagBit for $name {
            type Storage = $storage;

            fn bit_index(self) -> u8 {
                self as u8
            }
        }
    };
}

define_flags!(MovementFlag, u32, {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    Falling,
    Root,
    /// Position is expressed relative to a transport.
    OnTransport,
});

pub type MovementFlags = Flags<u32>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_has_remove_single_flag() {
        let mut flags = MovementFlags::default();
        assert!(flags.is_empty());

        flags.add(MovementFlag::OnTransport);
        assert!(flags.has(MovementFlag::OnTransport));
        assert!(!flags.has(MovementFlag::Forward));
        assert_eq!(flags.bits, 1 << 6);

        flags.remove(MovementFlag::OnTransport);
        assert!(flags.is_empty());
    }

    #[test]
    fn removing_one_flag_keeps_the_others() {
        let mut flags = MovementFlags::default();
        flags.add(MovementFlag::Forward);
        flags.add(MovementFlag::OnTransport);
        flags.add(MovementFlag::OnTransport);

        flags.remove(MovementFlag::OnTransport);
        assert!(flags.has(MovementFlag::Forward));
        assert!(!flags.has(MovementFlag::OnTransport));
    }
}
