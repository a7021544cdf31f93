//! Call-script adapter.
//!
//! A call script is a JSON array of [`RegistryCall`]s, each naming the caller
//! identity the host assigned to it. Scripts are parsed up-front, so a
//! malformed call or identity rejects the whole script before anything runs;
//! replay then dispatches calls in order and records one [`CallOutcome`] per
//! call without stopping at rejections.

mod messages;

use std::io::Read;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use thiserror::Error;
use tracing::debug;

pub use messages::{CallOutcome, RegistryCall, RegistrySummary, UserSummary};

use crate::domain::ports::RegistryCommand;

/// Errors raised while loading a call script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// The script could not be read.
    #[error("failed to read call script at '{path}': {message}")]
    Io {
        /// Path to the script, or `-` for standard input.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The script is not a JSON array of well-formed calls.
    #[error("invalid call script: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
    },
}

/// Parse a call script from a JSON string.
///
/// # Errors
///
/// Returns [`ScriptError::Parse`] for malformed JSON, unknown operations,
/// missing fields, or unparsable identities.
///
/// # Examples
/// ```
/// use social_music::inbound::script::{RegistryCall, parse_script};
///
/// let calls = parse_script(
///     r#"[{"op": "addSong",
///          "caller": "0x00000000000000000000000000000000000000aa",
///          "songName": "Song1"}]"#,
/// )
/// .expect("valid script");
/// assert!(matches!(calls[0], RegistryCall::AddSong { .. }));
/// ```
pub fn parse_script(json: &str) -> Result<Vec<RegistryCall>, ScriptError> {
    serde_json::from_str(json).map_err(|error| ScriptError::Parse {
        message: error.to_string(),
    })
}

/// Read and parse a call script from any reader.
///
/// # Errors
///
/// Returns [`ScriptError::Io`] when reading fails and [`ScriptError::Parse`]
/// when the content is not a valid script.
pub fn read_script(mut reader: impl Read, origin: &Path) -> Result<Vec<RegistryCall>, ScriptError> {
    let mut contents = String::new();
    reader
        .read_to_string(&mut contents)
        .map_err(|error| ScriptError::Io {
            path: origin.to_path_buf(),
            message: error.to_string(),
        })?;
    parse_script(&contents)
}

/// Load and parse a call script from a file.
///
/// # Errors
///
/// Returns [`ScriptError::Io`] when the file cannot be opened or read and
/// [`ScriptError::Parse`] when the content is not a valid script.
pub fn load_script(path: &Path) -> Result<Vec<RegistryCall>, ScriptError> {
    let io_error = |message: String| ScriptError::Io {
        path: path.to_path_buf(),
        message,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io_error("script path must name a file".to_owned()))?;

    let directory = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(|error| io_error(error.to_string()))?;
    let file = directory
        .open(Path::new(file_name))
        .map_err(|error| io_error(error.to_string()))?;

    read_script(file, path)
}

/// Dispatch calls in order, collecting one outcome per call.
pub fn replay<C>(command: &C, calls: impl IntoIterator<Item = RegistryCall>) -> Vec<CallOutcome>
where
    C: RegistryCommand + ?Sized,
{
    calls
        .into_iter()
        .enumerate()
        .map(|(index, call)| {
            debug!(index, caller = %call.caller(), "replaying call");
            CallOutcome::from(call.dispatch(command))
        })
        .collect()
}
