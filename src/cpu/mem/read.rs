// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE.txt for details)

//! Trait for reading and writing integers of any width to [Mem]

use super::Mem;
use core::mem::size_of;

/// Read or write a T at address `addr`, big-endian, wrapping at the end of memory
pub trait ReadWrite<T> {
    /// Reads a T from address `addr`
    fn read(&self, addr: u16) -> T;
    /// Write a T to address `addr`
    fn write(&mut self, addr: u16, data: T);
}

/// Implements Read and Write for the provided types
///
/// Relies on inherent methods of Rust numeric types:
/// - `Self::from_be_bytes`
/// - `Self::to_be_bytes`
macro_rules! impl_rw {
    ($($t:ty) ,* $(,)?) => {
        $(
            impl ReadWrite<$t> for Mem {
                #[inline(always)]
                fn read(&self, addr: u16) -> $t {
                    let mut bytes = [0; size_of::<$t>()];
                    for (offset, byte) in bytes.iter_mut().enumerate() {
                        *byte = self.read_byte(addr.wrapping_add(offset as u16));
                    }
                    // Chip-8 is a big-endian system
                    <$t>::from_be_bytes(bytes)
                }
                #[inline(always)]
                fn write(&mut self, addr: u16, data: $t) {
                    for (offset, byte) in data.to_be_bytes().into_iter().enumerate() {
                        self.write_byte(addr.wrapping_add(offset as u16), byte);
                    }
                }
            }
        )*
    };
}

impl_rw!(u8, u16);
