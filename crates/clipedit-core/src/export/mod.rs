//! Export trigger
//!
//! Hands encoded clips to the user. The editor core only produces
//! [`WavBytes`](crate::wav::WavBytes); where they end up is decided by an
//! [`ExportTarget`].
//!
//! # Architecture
//!
//! ```text
//! EditorSession::export()
//!     │
//!     │ WavBytes ("audio/wav")
//!     ▼
//! ExportTarget::deliver(bytes, "edited.wav")
//!     │
//!     ▼
//! DirectoryExport: temp file in target dir ──persist──► <dir>/edited.wav
//! ```

mod error;
mod target;

pub use error::ExportError;
pub use target::{DirectoryExport, ExportTarget, DEFAULT_EXPORT_FILE_NAME};
