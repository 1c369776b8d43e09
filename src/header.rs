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
//! Header block layout as specified by POSIX.1-1988 ("ustar"), see
//! <https://www.gnu.org/software/tar/manual/html_node/Standard.html>.
//! A Tar archive is a sequence of 512-byte blocks; each entry starts with one
//! header block describing the file, followed by its content in data blocks.
//!
//! [`PosixHeader`] is the raw 512-byte wire representation, [`Header`] the
//! owned value object it encodes and decodes.

#![allow(non_upper_case_globals)]

use crate::tar_format_types::{TarFormatOctal, TarFormatString};
use crate::{TarError, BLOCKSIZE, NAME_LEN, PREFIX_LEN};
use alloc::string::String;
use core::fmt::{Debug, Formatter};

/// The ustar magic written into the `magic` field on encode. Decoding does
/// not check the magic; the checksum is the integrity check, and archives
/// with the POSIX `"ustar\0"` magic or none at all (old v7 writers) decode
/// the same way.
pub const MAGIC: &[u8; 6] = b"ustar ";

/// Literal for the 2-byte `version` field, encoded as `20 00`.
const VERSION: &str = " ";

/// Byte region of the checksum field inside a header block. While the block
/// sum is taken these eight bytes count as ASCII spaces.
const CKSUM_RANGE: core::ops::Range<usize> = 148..156;

/// One file's metadata, decoded. This is a plain value object: construct it,
/// encode it with [`Header::encode`], or obtain it from a block via
/// [`PosixHeader::decode`]. Equality is field-wise, which makes the
/// encode/decode round-trip directly testable.
///
/// The `size` field is the content byte count recorded in the archive. Note
/// that non-content entry kinds (directories, links, devices, FIFOs) carry
/// zero content blocks no matter what `size` claims; see
/// [`TypeFlag::carries_content`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Full path of the entry, up to 255 bytes. Longer paths than 100 bytes
    /// are split across the wire `prefix`/`name` fields at a `/` boundary.
    /// No normalization is performed.
    pub name: String,
    /// UNIX permission bits.
    pub mode: ModeFlags,
    /// Owner user id.
    pub uid: u64,
    /// Owner group id.
    pub gid: u64,
    /// Content byte count. On the wire this is limited to eleven octal
    /// digits, i.e. 8GiB-1.
    pub size: u64,
    /// Modification time in seconds since the POSIX epoch.
    pub mtime: u64,
    /// Kind of the entry.
    pub type_flag: TypeFlag,
    /// Target path for hard and symbolic links, up to 100 bytes. Carried
    /// verbatim for other entry kinds.
    pub link_name: String,
    /// Owner user name, up to 32 bytes. Empty means "use `uid`".
    pub uname: String,
    /// Owner group name, up to 32 bytes. Empty means "use `gid`".
    pub gname: String,
    /// Device major number, only meaningful for character and block devices.
    pub dev_major: u64,
    /// Device minor number, only meaningful for character and block devices.
    pub dev_minor: u64,
}

impl Header {
    /// Creates a header of the given kind with empty owner strings, id and
    /// device numbers of zero, epoch mtime and `rw-r--r--` permissions.
    #[must_use]
    pub fn new(name: impl Into<String>, type_flag: TypeFlag) -> Self {
        Self {
            name: name.into(),
            mode: ModeFlags::OwnerRead
                | ModeFlags::OwnerWrite
                | ModeFlags::GroupRead
                | ModeFlags::OthersRead,
            uid: 0,
            gid: 0,
            size: 0,
            mtime: 0,
            type_flag,
            link_name: String::new(),
            uname: String::new(),
            gname: String::new(),
            dev_major: 0,
            dev_minor: 0,
        }
    }

    /// Creates a regular-file header with the given content size.
    #[must_use]
    pub fn regular(name: impl Into<String>, size: u64) -> Self {
        Self {
            size,
            ..Self::new(name, TypeFlag::Regular)
        }
    }

    /// Creates a directory header. Directory names conventionally end with
    /// a slash, but this is not enforced.
    #[must_use]
    pub fn directory(name: impl Into<String>) -> Self {
        let mut hdr = Self::new(name, TypeFlag::Directory);
        hdr.mode |= ModeFlags::OwnerExec | ModeFlags::GroupExec | ModeFlags::OthersExec;
        hdr
    }

    /// Creates a symbolic-link header pointing at `target`.
    #[must_use]
    pub fn symlink(name: impl Into<String>, target: impl Into<String>) -> Self {
        let mut hdr = Self::new(name, TypeFlag::SymbolicLink);
        hdr.link_name = target.into();
        hdr
    }

    /// Serializes the header into a 512-byte block, including the checksum.
    ///
    /// # Errors
    ///
    /// Returns [`TarError::PathTooLong`] if `name` does not fit the
    /// prefix/name split and [`TarError::FieldOverflow`] if a numeric field
    /// exceeds its octal wire width.
    pub fn encode(&self) -> Result<PosixHeader, TarError> {
        let (prefix, suffix) = split_name(&self.name)?;
        let mut hdr = PosixHeader {
            name: TarFormatString::from_str_lossy(suffix),
            mode: TarFormatOctal::from_value(self.mode.bits(), "mode")?,
            uid: TarFormatOctal::from_value(self.uid, "uid")?,
            gid: TarFormatOctal::from_value(self.gid, "gid")?,
            size: TarFormatOctal::from_value(self.size, "size")?,
            mtime: TarFormatOctal::from_value(self.mtime, "mtime")?,
            // blanked to spaces while the block sum is taken
            cksum: TarFormatOctal::new([b' '; 8]),
            typeflag: self.type_flag.into(),
            linkname: TarFormatString::from_str_lossy(&self.link_name),
            magic: TarFormatString::new(*MAGIC),
            version: TarFormatString::from_str_lossy(VERSION),
            uname: TarFormatString::from_str_lossy(&self.uname),
            gname: TarFormatString::from_str_lossy(&self.gname),
            dev_major: TarFormatOctal::from_value(self.dev_major, "dev_major")?,
            dev_minor: TarFormatOctal::from_value(self.dev_minor, "dev_minor")?,
            prefix: TarFormatString::from_str_lossy(prefix),
            _pad: [0; 12],
        };
        hdr.cksum = cksum_field(hdr.block_sum_unsigned());
        Ok(hdr)
    }
}

/// Splits a path into the `(prefix, suffix)` pair of the wire format. Paths
/// of up to 100 bytes go wholly into the name field. Longer paths are split
/// at a `/` boundary so that the suffix stays as long as possible; the
/// separator itself ends up at the end of the prefix half, which is why
/// decoding concatenates the two fields without re-inserting one.
fn split_name(name: &str) -> Result<(&str, &str), TarError> {
    let len = name.len();
    if len <= NAME_LEN {
        return Ok(("", name));
    }
    if len <= PREFIX_LEN + NAME_LEN {
        let bytes = name.as_bytes();
        for at in (len - NAME_LEN)..=PREFIX_LEN.min(len) {
            if bytes[at - 1] == b'/' {
                return Ok(name.split_at(at));
            }
        }
    }
    Err(TarError::PathTooLong { len })
}

/// Renders a block sum into the checksum field: six octal digits, one NUL,
/// one space. The sum of 512 bytes is at most `512 * 255` and always fits
/// six digits.
fn cksum_field(sum: u32) -> TarFormatOctal<8> {
    let mut bytes = [0; 8];
    let mut rest = sum;
    for slot in bytes[0..6].iter_mut().rev() {
        *slot = b'0' + (rest & 0o7) as u8;
        rest >>= 3;
    }
    bytes[7] = b' ';
    TarFormatOctal::new(bytes)
}

/// Header block of the ustar format (POSIX 1003.1-1990). Each entry starts
/// with such a block; the content follows in chunks of 512 bytes whose count
/// derives from the size field.
///
/// The struct is the wire representation itself: 512 bytes of ASCII/octal
/// fields with alignment 1, so a block borrowed from an archive buffer can
/// be viewed as a `PosixHeader` in place via [`PosixHeader::from_block`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(C, packed)]
pub struct PosixHeader {
    pub name: TarFormatString<NAME_LEN>,
    pub mode: TarFormatOctal<8>,
    pub uid: TarFormatOctal<8>,
    pub gid: TarFormatOctal<8>,
    // confusing; size is stored as ASCII string
    pub size: TarFormatOctal<12>,
    pub mtime: TarFormatOctal<12>,
    pub cksum: TarFormatOctal<8>,
    pub typeflag: TypeFlagRaw,
    pub linkname: TarFormatString<NAME_LEN>,
    pub magic: TarFormatString<6>,
    pub version: TarFormatString<2>,
    pub uname: TarFormatString<32>,
    pub gname: TarFormatString<32>,
    pub dev_major: TarFormatOctal<8>,
    pub dev_minor: TarFormatOctal<8>,
    pub prefix: TarFormatString<PREFIX_LEN>,
    // padding => to BLOCKSIZE bytes
    pub _pad: [u8; 12],
}

impl PosixHeader {
    /// Views a 512-byte block as a header in place. Every field of the
    /// struct has alignment 1, so any block pointer is valid for it.
    #[must_use]
    pub fn from_block(block: &[u8; BLOCKSIZE]) -> &Self {
        unsafe { &*block.as_ptr().cast::<Self>() }
    }

    /// The raw bytes of this header block.
    #[must_use]
    pub fn as_block(&self) -> &[u8; BLOCKSIZE] {
        unsafe { &*core::ptr::from_ref(self).cast::<[u8; BLOCKSIZE]>() }
    }

    /// A Tar archive is terminated, if an end-of-archive entry, which
    /// consists of two 512 blocks of zero bytes, is found.
    #[must_use]
    pub fn is_zero_block(&self) -> bool {
        self.as_block().iter().all(|byte| *byte == 0)
    }

    /// Block sum with unsigned byte interpretation, the checksum field
    /// counting as eight spaces.
    fn block_sum_unsigned(&self) -> u32 {
        self.as_block()
            .iter()
            .enumerate()
            .map(|(i, byte)| {
                if CKSUM_RANGE.contains(&i) {
                    u32::from(b' ')
                } else {
                    u32::from(*byte)
                }
            })
            .sum()
    }

    /// Block sum with each byte sign-extended as an 8-bit signed value.
    /// Some historical writers summed with signed arithmetic.
    fn block_sum_signed(&self) -> i64 {
        self.as_block()
            .iter()
            .enumerate()
            .map(|(i, byte)| {
                if CKSUM_RANGE.contains(&i) {
                    i64::from(b' ')
                } else {
                    i64::from(*byte as i8)
                }
            })
            .sum()
    }

    /// Recomputes the block sum and compares it against the recorded
    /// checksum, accepting either the unsigned or the signed
    /// interpretation.
    ///
    /// # Errors
    ///
    /// Returns [`TarError::NumberFormat`] if the checksum field itself is
    /// garbage and [`TarError::ChecksumMismatch`] if neither sum matches.
    pub fn verify_checksum(&self) -> Result<(), TarError> {
        let recorded = self
            .cksum
            .as_number::<u32>()
            .map_err(|_| TarError::NumberFormat { field: "cksum" })?;
        let unsigned_sum = self.block_sum_unsigned();
        if unsigned_sum == recorded {
            return Ok(());
        }
        let signed_sum = self.block_sum_signed();
        if signed_sum == i64::from(recorded) {
            return Ok(());
        }
        Err(TarError::ChecksumMismatch {
            recorded,
            unsigned_sum,
            signed_sum,
        })
    }

    /// Parses the block into an owned [`Header`], after verifying the
    /// checksum. The full path is the concatenation of the `prefix` and
    /// `name` fields; no separator is re-inserted, the encoder keeps the
    /// `/` in the prefix half.
    ///
    /// # Errors
    ///
    /// Checksum failures as in [`PosixHeader::verify_checksum`];
    /// [`TarError::NumberFormat`] for octal fields holding non-octal bytes;
    /// [`TarError::InvalidUtf8`] for string fields holding non-UTF-8 bytes.
    pub fn decode(&self) -> Result<Header, TarError> {
        self.verify_checksum()?;

        let mut full_name = TarFormatString::<{ PREFIX_LEN + NAME_LEN }>::new([0; 255]);
        full_name.append(&self.prefix);
        full_name.append(&self.name);

        Ok(Header {
            name: String::from(
                full_name
                    .as_str()
                    .map_err(|_| TarError::InvalidUtf8 { field: "name" })?,
            ),
            mode: ModeFlags::from_bits_truncate(parse_octal(&self.mode, "mode")?),
            uid: parse_octal(&self.uid, "uid")?,
            gid: parse_octal(&self.gid, "gid")?,
            size: parse_octal(&self.size, "size")?,
            mtime: parse_octal(&self.mtime, "mtime")?,
            type_flag: self.typeflag.flag(),
            link_name: parse_str(&self.linkname, "linkname")?,
            uname: parse_str(&self.uname, "uname")?,
            gname: parse_str(&self.gname, "gname")?,
            dev_major: parse_octal(&self.dev_major, "dev_major")?,
            dev_minor: parse_octal(&self.dev_minor, "dev_minor")?,
        })
    }
}

fn parse_octal<const N: usize>(
    field: &TarFormatOctal<N>,
    name: &'static str,
) -> Result<u64, TarError> {
    field
        .as_number::<u64>()
        .map_err(|_| TarError::NumberFormat { field: name })
}

fn parse_str<const N: usize>(
    field: &TarFormatString<N>,
    name: &'static str,
) -> Result<String, TarError> {
    field
        .as_str()
        .map(String::from)
        .map_err(|_| TarError::InvalidUtf8 { field: name })
}

/// Raw byte of the type-flag field. Conversion to [`TypeFlag`] is total:
/// bytes outside the known table become [`TypeFlag::Other`].
#[derive(Copy, Clone, PartialOrd, PartialEq, Eq)]
#[repr(transparent)]
pub struct TypeFlagRaw(u8);

impl TypeFlagRaw {
    /// Interprets the byte per the ustar type table.
    #[must_use]
    pub const fn flag(self) -> TypeFlag {
        TypeFlag::from_byte(self.0)
    }
}

impl From<TypeFlag> for TypeFlagRaw {
    fn from(flag: TypeFlag) -> Self {
        Self(flag.to_byte())
    }
}

impl Debug for TypeFlagRaw {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.flag(), f)
    }
}

/// Describes the kind of payload that follows after a [`PosixHeader`].
///
/// The table is the POSIX one; any other byte is preserved verbatim in
/// [`TypeFlag::Other`] so that vendor extensions round-trip losslessly.
/// Note that this puts contiguous files (`'7'`) into the `Other` arm, where
/// they keep carrying content, matching their historical treatment as
/// regular files.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TypeFlag {
    /// A regular file. Written as `'0'`; a NUL type byte decodes to this
    /// variant too, for compatibility with archives that never set the
    /// field.
    Regular,
    /// A file linked to another file previously archived. The linked-to
    /// name is in the `linkname` field.
    HardLink,
    /// A symbolic link to another file. The linked-to name is in the
    /// `linkname` field.
    SymbolicLink,
    /// Character special file; `dev_major`/`dev_minor` hold the device
    /// numbers.
    CharDevice,
    /// Block special file; `dev_major`/`dev_minor` hold the device numbers.
    BlockDevice,
    /// A directory. The name conventionally ends with a slash.
    Directory,
    /// A FIFO special file. Archiving a FIFO archives its existence, not
    /// its contents.
    Fifo,
    /// Any type byte outside the known table, carried verbatim.
    Other(u8),
}

impl TypeFlag {
    /// Maps a raw type byte to its variant. Total; never fails.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            0 | b'0' => Self::Regular,
            b'1' => Self::HardLink,
            b'2' => Self::SymbolicLink,
            b'3' => Self::CharDevice,
            b'4' => Self::BlockDevice,
            b'5' => Self::Directory,
            b'6' => Self::Fifo,
            other => Self::Other(other),
        }
    }

    /// The wire byte of this variant. [`TypeFlag::Regular`] always encodes
    /// as `'0'`.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        match self {
            Self::Regular => b'0',
            Self::HardLink => b'1',
            Self::SymbolicLink => b'2',
            Self::CharDevice => b'3',
            Self::BlockDevice => b'4',
            Self::Directory => b'5',
            Self::Fifo => b'6',
            Self::Other(byte) => byte,
        }
    }

    /// Whether entries of this kind carry content blocks. Directories,
    /// links, devices and FIFOs carry none, no matter what their size
    /// field claims.
    #[must_use]
    pub const fn carries_content(self) -> bool {
        matches!(self, Self::Regular | Self::Other(_))
    }
}

bitflags::bitflags! {
    /// UNIX file permissions in octal format.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ModeFlags: u64 {
        /// Set UID on execution.
        const SetUID = 0o4000;
        /// Set GID on execution.
        const SetGID = 0o2000;
        /// Reserved.
        const TSVTX = 0o1000;
        /// Owner read.
        const OwnerRead = 0o400;
        /// Owner write.
        const OwnerWrite = 0o200;
        /// Owner execute.
        const OwnerExec = 0o100;
        /// Group read.
        const GroupRead = 0o040;
        /// Group write.
        const GroupWrite = 0o020;
        /// Group execute.
        const GroupExec = 0o010;
        /// Others read.
        const OthersRead = 0o004;
        /// Others read.
        const OthersWrite = 0o002;
        /// Others execute.
        const OthersExec = 0o001;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;
    use std::string::ToString;

    /// Returns the PosixHeader at the beginning of the Tar archive.
    fn bytes_to_header(tar_archive_data: &[u8]) -> &PosixHeader {
        let block: &[u8; BLOCKSIZE] = tar_archive_data[0..BLOCKSIZE].try_into().unwrap();
        PosixHeader::from_block(block)
    }

    fn sample_header() -> Header {
        Header {
            name: "src/main.rs".to_string(),
            mode: ModeFlags::OwnerRead | ModeFlags::OwnerWrite | ModeFlags::GroupRead,
            uid: 1000,
            gid: 100,
            size: 1337,
            mtime: 1700000000,
            type_flag: TypeFlag::Regular,
            link_name: String::new(),
            uname: "ferris".to_string(),
            gname: "wheel".to_string(),
            dev_major: 0,
            dev_minor: 0,
        }
    }

    #[test]
    fn test_size() {
        assert_eq!(BLOCKSIZE, size_of::<PosixHeader>());
    }

    #[test]
    fn test_parse_fixture_header() {
        let hdr = bytes_to_header(include_bytes!("../tests/gnu_tar_ustar.tar"));
        assert_eq!(hdr.name.as_str(), Ok("greeting.txt"));
        assert_eq!(hdr.typeflag.flag(), TypeFlag::Regular);
        assert_eq!(hdr.size.as_number::<u64>(), Ok(12));
        hdr.verify_checksum().unwrap();

        let header = hdr.decode().unwrap();
        assert_eq!(header.name, "greeting.txt");
        assert_eq!(header.mode, ModeFlags::from_bits_truncate(0o644));
        assert_eq!(header.uid, 1000);
        assert_eq!(header.gid, 100);
        assert_eq!(header.mtime, 1700000000);
        assert_eq!(header.uname, "ferris");
        assert_eq!(header.gname, "wheel");
    }

    #[test]
    fn test_parse_v7_header() {
        // v7 writers leave the type byte NUL and the magic empty
        let hdr = bytes_to_header(include_bytes!("../tests/gnu_tar_v7.tar"));
        assert!(hdr.magic.is_empty());
        assert_eq!(hdr.typeflag.flag(), TypeFlag::Regular);
        let header = hdr.decode().unwrap();
        assert_eq!(header.name, "greeting.txt");
        assert_eq!(header.size, 12);
        assert_eq!(header.uname, "");
    }

    #[test]
    fn test_header_roundtrip() {
        let header = sample_header();
        let block = header.encode().unwrap();
        assert_eq!(block.decode().unwrap(), header);
    }

    #[test]
    fn test_encode_layout() {
        let block = sample_header().encode().unwrap();
        let bytes = block.as_block();
        assert_eq!(&bytes[0..11], b"src/main.rs");
        assert_eq!(bytes[11], 0);
        assert_eq!(&bytes[100..108], b"0000640\0");
        assert_eq!(&bytes[124..136], b"00000002471\0");
        assert_eq!(&bytes[257..263], b"ustar ");
        assert_eq!(&bytes[263..265], b" \0");
        assert_eq!(bytes[156], b'0');
        assert_eq!(&bytes[500..512], &[0; 12]);
        // checksum: six octal digits, NUL, space
        assert!(bytes[148..154].iter().all(u8::is_ascii_digit));
        assert_eq!(bytes[154], 0);
        assert_eq!(bytes[155], b' ');
    }

    #[test]
    fn test_flipping_any_byte_breaks_the_checksum() {
        let block = sample_header().encode().unwrap();
        for i in 0..BLOCKSIZE {
            if CKSUM_RANGE.contains(&i) {
                continue;
            }
            let mut corrupted = *block.as_block();
            corrupted[i] ^= 0xff;
            let err = PosixHeader::from_block(&corrupted).decode().unwrap_err();
            assert!(
                matches!(err, TarError::ChecksumMismatch { .. }),
                "byte {i}: {err:?}"
            );
        }
    }

    #[test]
    fn test_signed_checksum_is_accepted() {
        let block = sample_header().encode().unwrap();
        let mut bytes = *block.as_block();
        // a high byte in the reserved tail makes the two sums disagree
        bytes[510] = 0xff;
        let signed_sum = PosixHeader::from_block(&bytes).block_sum_signed();
        let mut cksum = [0u8; 8];
        let mut rest = signed_sum as u64;
        for slot in cksum[0..6].iter_mut().rev() {
            *slot = b'0' + (rest & 0o7) as u8;
            rest >>= 3;
        }
        cksum[7] = b' ';
        bytes[148..156].copy_from_slice(&cksum);

        let reparsed = PosixHeader::from_block(&bytes);
        assert_ne!(i64::from(reparsed.block_sum_unsigned()), signed_sum);
        reparsed.verify_checksum().unwrap();
    }

    #[test]
    fn test_unknown_type_bytes_are_preserved() {
        assert_eq!(TypeFlag::from_byte(b'9'), TypeFlag::Other(b'9'));
        assert_eq!(TypeFlag::Other(b'9').to_byte(), b'9');
        assert_eq!(TypeFlag::from_byte(b'\0'), TypeFlag::Regular);
        assert_eq!(TypeFlag::from_byte(b'0'), TypeFlag::Regular);
        assert_eq!(TypeFlag::Regular.to_byte(), b'0');
        // contiguous files fall into the Other arm and keep their content
        assert_eq!(TypeFlag::from_byte(b'7'), TypeFlag::Other(b'7'));
        assert!(TypeFlag::Other(b'7').carries_content());
        assert!(!TypeFlag::Directory.carries_content());
        assert!(!TypeFlag::SymbolicLink.carries_content());
    }

    #[test]
    fn test_split_name_short() {
        assert_eq!(split_name("a/b.txt"), Ok(("", "a/b.txt")));
    }

    #[test]
    fn test_split_name_long() {
        // 141 bytes; the slash lands in the prefix half
        let name = format!("{}/{}", "d".repeat(50), "x".repeat(90));
        let (prefix, suffix) = split_name(&name).unwrap();
        assert_eq!(prefix, format!("{}/", "d".repeat(50)));
        assert_eq!(suffix, "x".repeat(90));
        assert!(prefix.len() <= PREFIX_LEN && suffix.len() <= NAME_LEN);
    }

    #[test]
    fn test_split_name_picks_longest_suffix() {
        // both slashes are viable split points; the earlier one wins
        let name = format!("{}/{}/{}", "a".repeat(30), "b".repeat(30), "c".repeat(60));
        let (prefix, suffix) = split_name(&name).unwrap();
        assert_eq!(prefix.len(), 31);
        assert_eq!(suffix, format!("{}/{}", "b".repeat(30), "c".repeat(60)));
    }

    #[test]
    fn test_split_name_too_long() {
        // a single 160-byte component cannot be split at a separator
        let name = "y".repeat(160);
        assert_eq!(split_name(&name), Err(TarError::PathTooLong { len: 160 }));
        // neither can anything over 255 bytes
        let name = format!("{}/{}", "a".repeat(200), "b".repeat(99));
        assert_eq!(split_name(&name), Err(TarError::PathTooLong { len: 300 }));
    }

    #[test]
    fn test_long_name_roundtrip_without_separator_reinsertion() {
        let name = format!("deep/nested/path/{}", "f".repeat(95));
        let mut header = sample_header();
        header.name = name.clone();
        let decoded = header.encode().unwrap().decode().unwrap();
        assert_eq!(decoded.name, name);
    }

    #[test]
    fn test_encode_size_overflow() {
        let mut header = sample_header();
        header.size = 0o100000000000; // 8 GiB
        assert_eq!(
            header.encode().unwrap_err(),
            TarError::FieldOverflow {
                field: "size",
                width: 12,
                value: 0o100000000000,
            }
        );
    }
}
