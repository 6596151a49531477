//! The `.f3d` document: a single fractal serialized as pretty JSON.
//!
//! ```json
//! { "Fractal": { "a": 0.0, "b": 0.0, "c": 0.0, "n": 8, "type": "Mandelbulb", ... } }
//! ```
//!
//! Loading parses, validates and only then builds a [`FractalParameters`], so a rejected
//! document never replaces the caller's current state. Saving writes a sibling temp file and
//! renames it over the destination, so a failed save leaves the previous document intact.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{info, warn};

use crate::core::data::fractal_params::{FractalParameters, FractalRecord, ParamsError};

pub const DOCUMENT_EXTENSION: &str = "f3d";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed fractal document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid fractal parameters: {0}")]
    Invalid(#[from] ParamsError),
}

#[derive(Serialize, Deserialize)]
struct FractalDocument {
    #[serde(rename = "Fractal")]
    fractal: FractalRecord,
}

pub fn to_json(params: &FractalParameters) -> Result<String, DocumentError> {
    let document = FractalDocument {
        fractal: params.to_record(),
    };

    Ok(serde_json::to_string_pretty(&document)?)
}

pub fn from_json(text: &str) -> Result<FractalParameters, DocumentError> {
    let document: FractalDocument = serde_json::from_str(text)?;

    Ok(FractalParameters::try_from(document.fractal)?)
}

pub fn save_document(
    params: &FractalParameters,
    path: impl AsRef<Path>,
) -> Result<(), DocumentError> {
    let path = path.as_ref();
    let json = to_json(params)?;
    let io_error = |source: io::Error| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = NamedTempFile::new_in(parent_dir(path)).map_err(io_error)?;
    file.write_all(json.as_bytes()).map_err(io_error)?;
    file.persist(path).map_err(|failed| io_error(failed.error))?;

    info!(path = %path.display(), "fractal saved");

    Ok(())
}

/// Directory a temp file must live in to be renamed onto `path`.
pub(crate) fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

pub fn load_document(path: impl AsRef<Path>) -> Result<FractalParameters, DocumentError> {
    let path = path.as_ref();

    let text = fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match from_json(&text) {
        Ok(params) => {
            info!(path = %path.display(), kind = params.kind().display_name(), "fractal loaded");
            Ok(params)
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "fractal document rejected");
            Err(error)
        }
    }
}
