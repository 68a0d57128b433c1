//! Request list parsing
//!
//! A request list is plain text, one entry per line:
//!
//! ```text
//! # comment
//! -texture
//! STARTAN3
//! SW1BRCOM
//! -flat
//! NUKAGE1
//! -end
//! ```
//!
//! Blank lines and `#` comments are skipped, `-texture` and `-flat` switch
//! mode, `-end` stops reading. Mode lines are case-insensitive.

use std::io::BufRead;

use indexmap::IndexSet;

use crate::error::{Error, Result};
use crate::formats::name_key;

/// Requested names, case-folded, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub textures: IndexSet<String>,
    pub flats: IndexSet<String>,
}

impl ExtractionRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_texture(&mut self, name: &str) -> bool {
        self.textures.insert(name_key(name))
    }

    pub fn add_flat(&mut self, name: &str) -> bool {
        self.flats.insert(name_key(name))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty() && self.flats.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    None,
    Texture,
    Flat,
}

/// Read a request list.
///
/// # Errors
/// Returns [`Error::RequestBeforeMode`] for a name that precedes any
/// `-texture`/`-flat` line, or an IO error from `reader`.
pub fn read_request_list<R: BufRead>(reader: R) -> Result<ExtractionRequest> {
    let mut request = ExtractionRequest::new();
    let mut mode = Mode::None;

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.eq_ignore_ascii_case("-end") {
            break;
        } else if line.eq_ignore_ascii_case("-texture") {
            mode = Mode::Texture;
        } else if line.eq_ignore_ascii_case("-flat") {
            mode = Mode::Flat;
        } else {
            match mode {
                Mode::Texture => {
                    request.add_texture(line);
                }
                Mode::Flat => {
                    request.add_flat(line);
                }
                Mode::None => return Err(Error::RequestBeforeMode { line: number + 1 }),
            }
        }
    }

    Ok(request)
}

/// Parse a request list held in a string
pub fn parse_request_list(text: &str) -> Result<ExtractionRequest> {
    read_request_list(text.as_bytes())
}
