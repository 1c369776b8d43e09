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
//! Module for [`TarError`].

use thiserror::Error;

/// Failures of the codec. Every error aborts the current encode or decode
/// call; there is no retry or partial-success path. Unknown type-flag bytes
/// are *not* errors, they decode to [`crate::TypeFlag::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TarError {
    /// A numeric value does not fit the octal digits of its wire field.
    #[error("value {value:#o} does not fit the {width}-byte octal field `{field}`")]
    FieldOverflow {
        /// Header field name.
        field: &'static str,
        /// On-wire width of the field in bytes, including the NUL terminator.
        width: usize,
        /// The value that was too large.
        value: u64,
    },
    /// An octal wire field contains bytes outside `0..=7` (and padding).
    #[error("field `{field}` is not a valid octal number")]
    NumberFormat {
        /// Header field name.
        field: &'static str,
    },
    /// A path does not fit the name field and cannot be split into a
    /// prefix/suffix pair at a `/` boundary.
    #[error("path of {len} bytes cannot be split across the prefix/name fields")]
    PathTooLong {
        /// Length of the path in bytes.
        len: usize,
    },
    /// Neither the unsigned nor the signed byte sum of a header block
    /// matches its recorded checksum.
    #[error(
        "header checksum mismatch: recorded {recorded:#o}, \
         computed {unsigned_sum:#o} unsigned / {signed_sum:#o} signed"
    )]
    ChecksumMismatch {
        /// Checksum recorded in the header block.
        recorded: u32,
        /// Sum over the block with unsigned byte interpretation.
        unsigned_sum: u32,
        /// Sum over the block with signed (sign-extended) byte interpretation.
        signed_sum: i64,
    },
    /// Fewer bytes available than a full block or content run requires.
    #[error("input truncated at offset {offset}: needed {needed} bytes, {available} available")]
    TruncatedInput {
        /// Byte offset into the archive where the read started.
        offset: u64,
        /// Number of bytes the decoder needed.
        needed: u64,
        /// Number of bytes that were left.
        available: u64,
    },
    /// A string wire field holds bytes that are not valid UTF-8.
    #[error("field `{field}` is not valid UTF-8")]
    InvalidUtf8 {
        /// Header field name.
        field: &'static str,
    },
}
