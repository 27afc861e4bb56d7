use std::io::{self, Read, Seek};

use crate::Error;

/// How a downloaded asset is unpacked, decided from its filename alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveKind {
    /// No dot in the filename: the asset is the binary itself.
    Raw,
    /// Last dot segment is `zip`.
    Zip,
    /// Second-to-last dot segment is `tar` (`.tar.gz`, `.tar.xz`, ...).
    Tar,
    /// Has an extension that matches neither archive pattern.
    Unsupported,
}

impl ArchiveKind {
    pub fn from_filename(filename: &str) -> Self {
        let segments: Vec<&str> = filename.split('.').collect();
        match segments.as_slice() {
            [_] => Self::Raw,
            [.., last] if *last == "zip" => Self::Zip,
            [.., second_last, _] if *second_last == "tar" => Self::Tar,
            _ => Self::Unsupported,
        }
    }
}

/// Compression codec wrapped around a tar stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TarCompress {
    None,
    Gzip,
    Bzip2,
    Xz,
    Zstd,
}

impl TarCompress {
    /// Sniff the codec from the first bytes of the stream.
    ///
    /// Anything without a known compression magic is assumed to be a plain tar;
    /// a malformed one is reported by the tar reader.
    pub fn detect(header: &[u8]) -> Self {
        match header {
            [0x1F, 0x8B, ..] => Self::Gzip,
            [0x42, 0x5A, 0x68, ..] => Self::Bzip2,
            [0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00, ..] => Self::Xz,
            [0x28, 0xB5, 0x2F, 0xFD, ..] => Self::Zstd,
            _ => Self::None,
        }
    }

    /// Read the stream head, sniff the codec and rewind.
    pub fn detect_from_reader<R: Read + Seek>(reader: &mut R) -> io::Result<Self> {
        let mut header = Vec::with_capacity(8);
        reader.by_ref().take(8).read_to_end(&mut header)?;
        reader.rewind()?;
        Ok(Self::detect(&header))
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
            Self::Xz => "xz",
            Self::Zstd => "zstd",
        }
    }

    /// Wrap `reader` in the matching decoder.
    pub fn decoder<'a, R: Read + 'a>(self, reader: R) -> Result<Box<dyn Read + 'a>, Error> {
        match self {
            Self::None => Ok(Box::new(reader)),
            #[cfg(feature = "tar")]
            Self::Gzip => Ok(Box::new(flate2::read::GzDecoder::new(reader))),
            #[cfg(feature = "bzip2")]
            Self::Bzip2 => Ok(Box::new(bzip2::read::BzDecoder::new(reader))),
            #[cfg(feature = "xz")]
            Self::Xz => Ok(Box::new(xz2::read::XzDecoder::new(reader))),
            #[cfg(feature = "zstd")]
            Self::Zstd => {
                let decoder =
                    zstd::stream::read::Decoder::new(reader).map_err(|e| Error::Corrupted(e.to_string()))?;
                Ok(Box::new(decoder))
            }
            #[allow(unreachable_patterns)]
            other => Err(Error::UnsupportedFormat(format!("tar.{}", other.name()))),
        }
    }
}


#[cfg(test)]
mod tests_detect {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn detect_gzip() {
        assert_eq!(TarCompress::detect(&[0x1F, 0x8B, 0x08, 0x00]), TarCompress::Gzip);
    }

    #[test]
    fn detect_bzip2() {
        assert_eq!(TarCompress::detect(b"BZh91AY"), TarCompress::Bzip2);
    }

    #[test]
    fn detect_xz() {
        let xz_header = [0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00, 0x00, 0x00];
        assert_eq!(TarCompress::detect(&xz_header), TarCompress::Xz);
    }

    #[test]
    fn detect_zstd() {
        let zstd_header = [0x28, 0xB5, 0x2F, 0xFD, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(TarCompress::detect(&zstd_header), TarCompress::Zstd);
    }

    #[test]
    fn unknown_is_plain_tar() {
        assert_eq!(TarCompress::detect(&[0xDE, 0xAD, 0xBE, 0xEF]), TarCompress::None);
        assert_eq!(TarCompress::detect(&[]), TarCompress::None);
    }

    #[test]
    fn detect_from_reader_rewinds() {
        let mut cursor = Cursor::new(vec![0x1F, 0x8B, 0x08, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05]);
        assert_eq!(TarCompress::detect_from_reader(&mut cursor).unwrap(), TarCompress::Gzip);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn none_decoder_passes_through() {
        let mut decoder = TarCompress::None.decoder(Cursor::new(b"hello".to_vec())).unwrap();
        let mut out = String::new();
        decoder.read_to_string(&mut out).unwrap();
        assert_eq!(out, "hello");
    }

    #[test]
    #[cfg(not(feature = "xz"))]
    fn xz_decoder_unsupported_without_feature() {
        let result = TarCompress::Xz.decoder(Cursor::new(Vec::new()));
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }
}
