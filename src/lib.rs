/*
MIT License

Copyright (c) 2021 Philipp Schuster

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/
//! Library to encode and decode USTAR (POSIX.1-1988) Tar archives in `no_std`
//! contexts. If you have a standard environment and need full feature support,
//! I recommend the use of <https://crates.io/crates/tar> instead.
//!
//! The crate is a pure in-memory codec: no filesystem access, no compression,
//! no blocking I/O. Encoding turns an ordered list of [`Entry`]s into the
//! byte-exact archive representation; decoding walks the 512-byte blocks of
//! an archive and yields the entries back, lazily, via [`ArchiveIter`].
//!
//! Supported is the "basic" ustar format only, therefore no extensions such
//! as GNU Longname, PAX headers or sparse files. The maximum path length is
//! 255 bytes (split across the ustar name/prefix fields at a `/` boundary)
//! and the maximum file size is 8GiB-1 (eleven octal digits). Unknown
//! type-flag bytes are preserved verbatim and round-trip losslessly.
//!
//! An allocator is required (`alloc`); `std` is not.

#![cfg_attr(not(test), no_std)]
#![deny(rustdoc::all)]
#![allow(rustdoc::missing_doc_code_examples)]
#![deny(clippy::all)]
#![deny(missing_debug_implementations)]

extern crate alloc;

#[cfg_attr(test, macro_use)]
#[cfg(test)]
extern crate std;

/// Each archive entry (either header or data block) is a block of 512 bytes.
const BLOCKSIZE: usize = 512;

/// Width of the `name` field of a header block.
const NAME_LEN: usize = 100;

/// Width of the `prefix` field of a header block.
const PREFIX_LEN: usize = 155;

mod archive;
mod error;
mod header;
mod tar_format_types;

pub use archive::*;
pub use error::*;
pub use header::*;
pub use tar_format_types::*;
