use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use eyre::{ensure, Result};
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;

/// File stream with its compression container peeled off.
pub enum DecompressedStream {
    PlainText(File),
    Gzip(MultiGzDecoder<File>),
}

impl DecompressedStream {
    pub fn box_read(self) -> Box<dyn Read + Send> {
        match self {
            DecompressedStream::PlainText(x) => Box::new(x),
            DecompressedStream::Gzip(x) => Box::new(x),
        }
    }
}

/// Open a file for reading. Gzip is detected from the file signature, not
/// the extension, so renamed archives still decompress.
pub fn read_file(path: impl AsRef<Path>) -> Result<DecompressedStream> {
    let path = path.as_ref();
    ensure!(path.is_file(), "Path {} is not a file", path.display());

    let mime = infer::get_from_path(path)?.map(|x| x.mime_type());
    let file = File::open(path)?;
    match mime {
        Some("application/gzip") => Ok(DecompressedStream::Gzip(MultiGzDecoder::new(file))),
        _ => Ok(DecompressedStream::PlainText(file)),
    }
}

/// Create a file for writing, gzip-encoding when the extension asks for it.
pub fn create_file(path: impl AsRef<Path>) -> Result<Box<dyn Write + Send>> {
    let path = path.as_ref();
    let file = File::create(path)?;
    match path.extension().and_then(|x| x.to_str()) {
        Some("gz") | Some("gzip") => Ok(Box::new(GzEncoder::new(
            file,
            flate2::Compression::default(),
        ))),
        _ => Ok(Box::new(BufWriter::new(file))),
    }
}
