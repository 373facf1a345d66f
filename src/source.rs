//! Provides the `ManifestSource` trait, which is all the parsers need from
//! their input, and `ManifestReader`, the source for manifest files on disk.
//! *Note:* both kinds of source translate UTF-16 to UTF-8, but by different
//! code paths: a file is decoded as it streams, a byte slice all at once.
use bstr::io::BufReadExt;
use bstr::ByteSlice;
use encoding_rs_io::{DecodeReaderBytes, DecodeReaderBytesBuilder};
use std::{
    borrow::Cow,
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};

/// The parsers' only requirement for their input is that it implements
/// `for_byte_line`. The `ManifestSource` trait codifies that.
pub trait ManifestSource {
    /// The call `s.for_byte_line(|line| ...)` calls the given closure for each
    /// line of `s`, with the line terminator (`\n` or `\r\n`) removed.
    fn for_byte_line(self, for_each_line: impl FnMut(&[u8])) -> io::Result<()>;
}

impl ManifestSource for &[u8] {
    fn for_byte_line(self, for_each_line: impl FnMut(&[u8])) -> io::Result<()> {
        decode_if_utf16(self).lines().for_each(for_each_line);
        Ok(())
    }
}

impl ManifestSource for &str {
    fn for_byte_line(self, for_each_line: impl FnMut(&[u8])) -> io::Result<()> {
        ManifestSource::for_byte_line(self.as_bytes(), for_each_line)
    }
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode UTF-16 to UTF-8 if we see a UTF-16 Byte Order Mark at the beginning
/// of `candidate`, and drop a UTF-8 Byte Order Mark. Otherwise return
/// `candidate` unchanged.
fn decode_if_utf16(candidate: &[u8]) -> Cow<'_, [u8]> {
    // Note: `decode_without_bom_handling` changes malformed sequences to the
    // Unicode REPLACEMENT CHARACTER, which the parsers then reject as an
    // unusable line.
    if let Some((enc, bom_len)) = encoding_rs::Encoding::for_bom(candidate) {
        if [encoding_rs::UTF_16LE, encoding_rs::UTF_16BE].contains(&enc) {
            let (translated, _had_malformed_sequences) =
                enc.decode_without_bom_handling(&candidate[bom_len..]);
            return Cow::Owned(translated.into_owned().into_bytes());
        }
    }
    Cow::Borrowed(candidate.strip_prefix(UTF8_BOM).unwrap_or(candidate))
}

/// A manifest read from disk (or any other `Read`), buffered and decoded: a
/// UTF-16 Byte Order Mark switches decoding to UTF-16, a UTF-8 one is removed,
/// and anything else passes through untouched.
pub struct ManifestReader<R: Read> {
    reader: BufReader<DecodeReaderBytes<R, Vec<u8>>>,
}

impl<R: Read> ManifestReader<R> {
    /// Wrap `inner` in the decoding, buffered reader
    pub fn new(inner: R) -> Self {
        let reader = BufReader::new(
            DecodeReaderBytesBuilder::new()
                .bom_sniffing(true) // Look at the BOM to detect UTF-16 files and convert to UTF-8
                .strip_bom(true) // Remove the BOM before sending data to us
                .utf8_passthru(true) // Don't enforce UTF-8 (BOM or no BOM)
                .build(inner),
        );
        ManifestReader { reader }
    }
}

impl ManifestReader<File> {
    /// Open the manifest at `path`. The file is closed when the reader is
    /// dropped, which `for_byte_line` does when it's done, successful or not.
    pub fn open(path: &Path) -> io::Result<Self> {
        File::open(path).map(ManifestReader::new)
    }
}

impl<R: Read> ManifestSource for ManifestReader<R> {
    /// A convenience wrapper around `bstr::for_byte_line`
    fn for_byte_line(self, mut for_each_line: impl FnMut(&[u8])) -> io::Result<()> {
        let mut reader = self.reader;
        reader.for_byte_line(|line| {
            for_each_line(line);
            Ok(true)
        })
    }
}
