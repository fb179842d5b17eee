//! clipedit - command-line host for the clip editor core
//!
//! Plays the roles the core leaves to its collaborators: it reads the input
//! file, shows the waveform overview as text, and delivers the exported WAV
//! to a directory.

pub mod app;
pub mod cli;
pub mod waveform_text;
