//! Statistical-data bridge
//!
//! Marshals nested statistical-language data (scalars, vectors, named
//! lists, tables) to and from files through the [`DataValue`] sum type.
//! This subsystem is a sibling utility of the tick planner; neither
//! depends on the other.
//!
//! Loading applies the source language's singleton-reduction rule: a
//! one-element vector comes back as its scalar. Saving refuses unsupported
//! shapes with a fatal `UnsupportedType` error rather than attempting a
//! partial conversion.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

use crate::{PlotkitError, Result};

mod value;

pub use value::DataValue;

static INIT: Once = Once::new();
static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize the bridge's conversion machinery.
///
/// Explicit, idempotent, process-wide setup, intended to be invoked once
/// at process start. The JSON backend holds no global state, so this is
/// currently a marker; interop backends that need runtime activation hook
/// in here. [`load`] and [`save`] do not require it to have been called.
pub fn init() {
    INIT.call_once(|| {
        INITIALIZED.store(true, Ordering::SeqCst);
    });
}

/// True once [`init`] has run
pub fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::SeqCst)
}

/// Load a nested data value from a file.
///
/// A missing file is an `IoError` raised before any parse attempt. After
/// parsing, singleton vectors are reduced to scalars.
pub fn load(path: impl AsRef<Path>) -> Result<DataValue> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(PlotkitError::IoError(format!(
            "Cannot find file `{}`",
            path.display()
        )));
    }
    let contents = fs::read_to_string(path).map_err(|e| {
        PlotkitError::IoError(format!("Failed to read `{}`: {}", path.display(), e))
    })?;
    let json: serde_json::Value = serde_json::from_str(&contents).map_err(|e| {
        PlotkitError::SerdeError(format!("Failed to parse `{}`: {}", path.display(), e))
    })?;
    Ok(DataValue::from_json(&json)?.reduce())
}

/// Save a nested data value to a file.
///
/// Serialization failures (unsupported vector elements or table column
/// types) surface before anything is written.
pub fn save(value: &DataValue, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = value.to_json()?;
    let text = serde_json::to_string_pretty(&json).map_err(|e| {
        PlotkitError::SerdeError(format!("Failed to serialize value: {}", e))
    })?;
    fs::write(path, text).map_err(|e| {
        PlotkitError::IoError(format!("Failed to write `{}`: {}", path.display(), e))
    })
}
