//! Vision STT - Speech-to-text clients.
//!
//! The transcription service depends on the [`SpeechToText`] trait only, so
//! the Groq client can be swapped for a fake in tests.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod error;
pub mod groq;
pub mod traits;

pub use error::SttError;
pub use groq::GroqStt;
pub use traits::{AudioUpload, SpeechToText};
