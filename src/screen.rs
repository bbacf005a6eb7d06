// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE.txt for details)

//! Stores and displays the Chip-8's screen memory

use std::fmt::{Display, Formatter, Result};

/// Width of the screen, in pixels
pub const WIDTH: usize = 64;
/// Height of the screen, in pixels
pub const HEIGHT: usize = 32;

/// A 64x32 monochrome framebuffer
///
/// Each row is stored in a [u64], with column 0 in the most significant bit.
/// Only [Screen::clear] and [Screen::draw] change it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Screen {
    rows: [u64; HEIGHT],
}

impl Screen {
    /// Creates a blank screen
    pub fn new() -> Self {
        Screen { rows: [0; HEIGHT] }
    }

    /// Clears every pixel
    pub fn clear(&mut self) {
        self.rows = [0; HEIGHT];
    }

    /// Gets the pixel at (x, y), wrapping both coordinates
    /// # Examples
    /// ```rust
    /// # use chippy::prelude::*;
    /// let mut screen = Screen::new();
    /// screen.draw(0, 0, &[0x80]);
    /// assert!(screen.pixel(0, 0));
    /// assert!(screen.pixel(64, 32));
    /// assert!(!screen.pixel(1, 0));
    /// ```
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.rows[y % HEIGHT] & (1 << (WIDTH - 1 - x % WIDTH)) != 0
    }

    /// XORs an 8-pixel-wide sprite onto the screen at (x, y)
    ///
    /// The sprite wraps around both edges of the screen.
    /// Returns true if any lit pixel was turned off.
    /// # Examples
    /// ```rust
    /// # use chippy::prelude::*;
    /// let mut screen = Screen::new();
    /// assert!(!screen.draw(62, 0, &[0xff]));
    /// // columns 62, 63, then 0..=5
    /// assert!(screen.pixel(63, 0) && screen.pixel(0, 0) && screen.pixel(5, 0));
    /// assert!(!screen.pixel(6, 0));
    /// // drawing it again erases it
    /// assert!(screen.draw(62, 0, &[0xff]));
    /// assert_eq!(Screen::new(), screen);
    /// ```
    pub fn draw(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (line, &byte) in sprite.iter().enumerate() {
            let row = &mut self.rows[(y as usize + line) % HEIGHT];
            // Rotation carries the columns that fall off the right edge back to the left
            let mask = ((byte as u64) << (WIDTH - 8)).rotate_right(x as u32 % WIDTH as u32);
            collision |= *row & mask != 0;
            *row ^= mask;
        }
        collision
    }

    /// Gets the screen as packed 1bpp bytes, row-major, MSB first
    pub fn as_bytes(&self) -> Vec<u8> {
        self.rows.iter().flat_map(|row| row.to_be_bytes()).collect()
    }

    /// Returns true if no pixel is lit
    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|&row| row == 0)
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Screen {
    /// Prints the screen using braille characters
    #[cfg(feature = "drawille")]
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        use drawille::Canvas;
        let mut canvas = Canvas::new(WIDTH as u32, HEIGHT as u32);
        for y in 0..HEIGHT {
            for x in (0..WIDTH).filter(|&x| self.pixel(x, y)) {
                canvas.set(x as u32, y as u32);
            }
        }
        write!(f, "{}", canvas.frame())
    }

    /// Prints the screen using box characters
    #[cfg(not(feature = "drawille"))]
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for (index, row) in self.rows.iter().enumerate() {
            writeln!(
                f,
                "{index:02}|{}|",
                format!("{row:064b}").replace('0', " ").replace('1', "█")
            )?;
        }
        Ok(())
    }
}
