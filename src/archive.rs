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
//! Module for [`TarArchive`] and [`ArchiveIter`]: pairing a header with its
//! content bytes, block alignment of the content, and the two-zero-block
//! end-of-archive protocol.

use crate::header::PosixHeader;
use crate::{Header, TarError, BLOCKSIZE};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};

/// Describes an entry in an archive: one [`Header`] paired with the content
/// bytes. Entries are value objects; once constructed they are not mutated.
///
/// Invariant: `data.len() == header.size` for content-carrying kinds
/// ([`crate::TypeFlag::carries_content`]) and `data` is empty for all
/// others. Decoding upholds this even for malformed archives where a
/// directory or link claims a nonzero size; encoding relies on it.
#[derive(Clone, PartialEq, Eq)]
pub struct Entry {
    header: Header,
    data: Vec<u8>,
}

impl Entry {
    /// Pairs a header with its content. The caller upholds the size
    /// invariant described on [`Entry`].
    #[must_use]
    pub const fn new(header: Header, data: Vec<u8>) -> Self {
        Self { header, data }
    }

    /// Regular-file entry; the header's size is derived from the content.
    #[must_use]
    pub fn regular(name: impl Into<String>, data: Vec<u8>) -> Self {
        let header = Header::regular(name, data.len() as u64);
        Self { header, data }
    }

    /// Metadata of the entry.
    #[must_use]
    pub const fn header(&self) -> &Header {
        &self.header
    }

    /// Content of the entry. Empty for directories, links, devices and
    /// FIFOs.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the entry into its header and content.
    #[must_use]
    pub fn into_inner(self) -> (Header, Vec<u8>) {
        (self.header, self.data)
    }

    /// Serializes the entry: one header block, then the content, then NUL
    /// padding up to the next block boundary (possibly zero bytes of
    /// padding). Non-content-carrying kinds emit the header block only.
    ///
    /// # Errors
    ///
    /// Fails if the header does not encode, see [`Header::encode`].
    pub fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), TarError> {
        let block = self.header.encode()?;
        out.extend_from_slice(block.as_block());
        if self.header.type_flag.carries_content() {
            out.extend_from_slice(&self.data);
            out.resize(out.len() + padding_len(self.data.len()), 0);
        }
        Ok(())
    }

    /// On-wire length of the entry: header block plus block-aligned content.
    fn encoded_len(&self) -> usize {
        let payload = if self.header.type_flag.carries_content() {
            self.data.len()
        } else {
            0
        };
        BLOCKSIZE + payload + padding_len(payload)
    }
}

/// Bytes needed to pad a content run to the next block boundary.
const fn padding_len(payload_len: usize) -> usize {
    payload_len.next_multiple_of(BLOCKSIZE) - payload_len
}

impl Debug for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Entry")
            .field("name", &self.header.name)
            .field("type_flag", &self.header.type_flag)
            .field("size", &self.data.len())
            .field("data", &"<bytes>")
            .finish()
    }
}

/// An archive held in memory: the ordered sequence of its entries. Order is
/// meaningful, it matches the on-disk block order.
///
/// [`TarArchive::decode`] materializes all entries eagerly; use
/// [`ArchiveIter`] directly to stream large archives entry by entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TarArchive {
    entries: Vec<Entry>,
}

impl TarArchive {
    /// Creates an archive from entries, preserving their order.
    #[must_use]
    pub const fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// Parses all entries of the archive bytes.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed block; no partial archive is returned.
    pub fn decode(data: &[u8]) -> Result<Self, TarError> {
        let entries = ArchiveIter::new(data).collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// Serializes the archive: every entry in order, then the two all-zero
    /// terminator blocks. The result length is always a multiple of the
    /// block size; an empty archive encodes to exactly 1024 zero bytes.
    ///
    /// # Errors
    ///
    /// Fails if an entry does not encode, see [`Entry::encode_into`].
    pub fn encode(&self) -> Result<Vec<u8>, TarError> {
        let len = self
            .entries
            .iter()
            .map(Entry::encoded_len)
            .sum::<usize>()
            + 2 * BLOCKSIZE;
        let mut out = Vec::with_capacity(len);
        for entry in &self.entries {
            entry.encode_into(&mut out)?;
        }
        out.resize(len, 0);
        Ok(out)
    }

    /// The entries in archive order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Consumes the archive into its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}

impl FromIterator<Entry> for TarArchive {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Iterator over the entries of an archive's bytes. Each iteration step
/// decodes one header block and consumes the content and padding blocks it
/// announces; block N must be decoded before block N+1 can be located.
///
/// A block whose first byte is NUL terminates the iteration; the mandated
/// second zero block is not required to be present, its absence is only
/// logged. The iterator is fused: after the first decode error it yields
/// `None` forever, there is no partial-archive recovery.
#[derive(Debug)]
pub struct ArchiveIter<'a> {
    data: &'a [u8],
    offset: usize,
    done: bool,
}

impl<'a> ArchiveIter<'a> {
    /// Starts iterating at the first block of `data`.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            done: false,
        }
    }

    fn fail(&mut self, err: TarError) -> Option<Result<Entry, TarError>> {
        self.done = true;
        Some(Err(err))
    }
}

impl Iterator for ArchiveIter<'_> {
    type Item = Result<Entry, TarError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.offset >= self.data.len() {
            log::warn!("Reached end of Tar archive data without finding zero/end blocks!");
            self.done = true;
            return None;
        }

        let available = self.data.len() - self.offset;
        if available < BLOCKSIZE {
            return self.fail(TarError::TruncatedInput {
                offset: self.offset as u64,
                needed: BLOCKSIZE as u64,
                available: available as u64,
            });
        }
        let block: &[u8; BLOCKSIZE] = self.data[self.offset..self.offset + BLOCKSIZE]
            .try_into()
            .unwrap();

        // a zero-leading block ends the archive
        if block[0] == 0 {
            let second = self
                .data
                .get(self.offset + BLOCKSIZE..self.offset + 2 * BLOCKSIZE);
            if PosixHeader::from_block(block).is_zero_block()
                && second.is_some_and(|bytes| bytes.iter().all(|byte| *byte == 0))
            {
                log::debug!("End of Tar archive with two zero blocks!");
            } else {
                log::warn!("Zero block found at end of Tar archive, but without a full two-block terminator!");
            }
            self.done = true;
            return None;
        }

        let header = match PosixHeader::from_block(block).decode() {
            Ok(header) => header,
            Err(err) => return self.fail(err),
        };

        // non-content kinds occupy no data blocks, even if their size
        // field claims otherwise
        let payload_len = if header.type_flag.carries_content() {
            header.size
        } else {
            0
        };
        let occupied = payload_len.div_ceil(BLOCKSIZE as u64) * BLOCKSIZE as u64;
        let content_offset = self.offset + BLOCKSIZE;
        let available = (self.data.len() - content_offset) as u64;
        if available < occupied {
            return self.fail(TarError::TruncatedInput {
                offset: content_offset as u64,
                needed: occupied,
                available,
            });
        }

        // the bound check above guarantees these fit in usize
        let payload_len = payload_len as usize;
        let data = self.data[content_offset..content_offset + payload_len].to_vec();
        self.offset = content_offset + occupied as usize;
        Some(Ok(Entry::new(header, data)))
    }
}
