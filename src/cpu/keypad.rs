// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The 16-key hexadecimal keypad

use crate::error::{Error, Result};

/// Represents the state of the 16 keys, `0`..=`F`
///
/// Written by an [Input](crate::io::Input) collaborator, read by the CPU.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Keypad {
    keys: [bool; 16],
    /// The most recent key to go from released to pressed
    lastkey: Option<u8>,
    /// Set when `lastkey` was pressed before the current frame
    stale: bool,
}

impl Keypad {
    /// Presses a key, and reports whether the key's state changed.
    /// If key does not exist, returns [Error::InvalidKey].
    ///
    /// # Examples
    /// ```rust
    /// # use chippy::prelude::*;
    /// let mut keys = Keypad::default();
    ///
    /// // press key `7`
    /// let did_press = keys.press(0x7).unwrap();
    /// assert!(did_press);
    ///
    /// // press key `7` again, even though it's already pressed
    /// let did_press = keys.press(0x7).unwrap();
    /// // it was already pressed, so nothing's changed.
    /// assert!(!did_press);
    /// ```
    pub fn press(&mut self, key: usize) -> Result<bool> {
        let keyref = self.keys.get_mut(key).ok_or(Error::InvalidKey { key })?;
        if *keyref {
            return Ok(false);
        }
        *keyref = true;
        self.lastkey = Some(key as u8);
        self.stale = false;
        Ok(true)
    }

    /// Releases a key, and reports whether the key's state changed.
    /// If key is outside range `0..=0xF`, returns [Error::InvalidKey].
    /// # Examples
    /// ```rust
    /// # use chippy::prelude::*;
    /// let mut keys = Keypad::default();
    /// keys.press(0x7).unwrap();
    /// assert!(keys.release(0x7).unwrap()); // key released
    /// assert!(!keys.release(0x7).unwrap()); // key was not held
    /// ```
    pub fn release(&mut self, key: usize) -> Result<bool> {
        let keyref = self.keys.get_mut(key).ok_or(Error::InvalidKey { key })?;
        let changed = *keyref;
        *keyref = false;
        Ok(changed)
    }

    /// Releases every key
    pub fn release_all(&mut self) {
        self.keys = [false; 16];
    }

    /// Gets whether a key is held. Only the low nibble of `key` is used.
    #[inline(always)]
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[(key & 0xf) as usize]
    }

    /// Gets the state of every key
    pub fn keys(&self) -> &[bool; 16] {
        &self.keys
    }

    /// Takes the last key pressed, if there was one
    pub fn take_press(&mut self) -> Option<u8> {
        self.lastkey.take()
    }

    /// Begins a new frame. Any press made before now becomes stale,
    /// and will not satisfy a key wait which begins after this.
    pub fn settle(&mut self) {
        self.stale = true;
    }

    /// Forgets the last key pressed, if it was pressed before the current frame
    pub(crate) fn forget_stale(&mut self) {
        if self.stale {
            self.lastkey = None;
        }
    }
}
