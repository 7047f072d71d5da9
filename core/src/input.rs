//! Input sources for reading tables.

use std::{
    env,
    fs::File,
    io::{self, IsTerminal as _},
    path::PathBuf,
};

use flate2::bufread::MultiGzDecoder;

/// An input source for reading.
#[derive(Debug)]
pub enum Input {
    /// A path from which to read a file.
    Path(PathBuf),
    /// Stdin.
    Stdin,
}

impl Input {
    /// By default, reading an `Input` checks that either a path is provided, or that input is
    /// available via stdin, instead of hanging.
    ///
    /// In some contexts, e.g. testing, this can cause issues, and so it may be disabled by setting
    /// this environment variable, or by using [`Input::new_unchecked`].
    pub const ENV_KEY_DISABLE_CHECK: &'static str = "CENTRALITY_ALLOW_STDIN";

    /// Creates a new input source.
    pub fn new(input: Option<PathBuf>) -> io::Result<Self> {
        let check = env::var(Self::ENV_KEY_DISABLE_CHECK).is_err();

        if input.is_some() && !io::stdin().is_terminal() && check {
            Err(io::Error::new(
                io::ErrorKind::Other,
                "received input both via file and stdin",
            ))
        } else if input.is_none() && io::stdin().is_terminal() && check {
            Err(io::Error::new(
                io::ErrorKind::Other,
                "received no input via file or stdin",
            ))
        } else {
            Ok(Self::new_unchecked(input))
        }
    }

    /// Creates a new input source without checking that any data is available.
    pub fn new_unchecked(input: Option<PathBuf>) -> Self {
        if let Some(path) = input {
            Self::Path(path)
        } else {
            Self::Stdin
        }
    }

    /// Open the input for reading.
    ///
    /// Gzip-compressed input is detected and decompressed transparently.
    pub fn open(&self) -> io::Result<Box<dyn io::BufRead>> {
        match self {
            Input::Path(path) => File::open(path)
                .map(io::BufReader::new)
                .and_then(decompress),
            Input::Stdin => decompress(io::stdin().lock()),
        }
    }
}

fn decompress<R>(mut reader: R) -> io::Result<Box<dyn io::BufRead>>
where
    R: 'static + io::BufRead,
{
    const GZIP_MAGIC_NUMBER: [u8; 2] = [0x1f, 0x8b];

    let src = reader.fill_buf()?;

    if src.get(..GZIP_MAGIC_NUMBER.len()) == Some(&GZIP_MAGIC_NUMBER[..]) {
        Ok(Box::new(io::BufReader::new(MultiGzDecoder::new(reader))))
    } else {
        Ok(Box::new(reader))
    }
}
