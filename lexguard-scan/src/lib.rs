// lexguard-scan/src/lib.rs
#![no_std]

extern crate alloc; 

#[cfg(feature = "std")]
extern crate std;

pub mod automaton;
pub mod interval;
pub mod lookup;
pub mod mask;
pub mod scanner;
pub mod window;

/// Byte offset into the scanned `str`.
pub type ByteOffset = usize;
