//! Tone output backends for the alarm
//!
//! Tone emission is best-effort: a backend may fail, and callers log and move on.

use std::{
    io::{self, Write},
    time::Duration,
};

use crate::error::AudioError;

/// A single alarm tone, played `delay` after the pattern starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration: Duration,
    pub delay: Duration,
}

impl Tone {
    pub const fn new(frequency_hz: f32, duration_ms: u64, delay_ms: u64) -> Self {
        Self {
            frequency_hz,
            duration: Duration::from_millis(duration_ms),
            delay: Duration::from_millis(delay_ms),
        }
    }
}

/// Something that can emit a tone without blocking the caller
pub trait ToneBackend {
    fn emit(&self, tone: Tone) -> Result<(), AudioError>;
}

/// Rings the terminal bell on stderr
#[derive(Debug, Default)]
pub struct BellBackend;

impl ToneBackend for BellBackend {
    fn emit(&self, tone: Tone) -> Result<(), AudioError> {
        // A bell has no pitch or length; only the first note of each bar rings
        if !tone.delay.is_zero() {
            return Ok(());
        }
        let mut stderr = io::stderr().lock();
        stderr.write_all(b"\x07")?;
        stderr.flush()?;
        Ok(())
    }
}

/// Emits nothing
#[derive(Debug, Default)]
pub struct SilentBackend;

impl ToneBackend for SilentBackend {
    fn emit(&self, _tone: Tone) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Sine-tone synthesis on the default output device
#[cfg(feature = "audio")]
#[derive(Debug, Default)]
pub struct SynthBackend;

#[cfg(feature = "audio")]
impl SynthBackend {
    /// Probe the default output device once so a missing device is reported up front
    pub fn probe() -> Result<Self, AudioError> {
        rodio::OutputStream::try_default()
            .map(|_| Self)
            .map_err(|e| AudioError::Unavailable(e.to_string()))
    }
}

#[cfg(feature = "audio")]
impl ToneBackend for SynthBackend {
    fn emit(&self, tone: Tone) -> Result<(), AudioError> {
        // The output stream is not Send, so each tone owns its stream on a short-lived thread
        std::thread::Builder::new()
            .name("chronopulse-tone".to_string())
            .spawn(move || {
                use rodio::{source::SineWave, OutputStream, Sink, Source};

                let Ok((_stream, stream_handle)) = OutputStream::try_default() else {
                    return;
                };
                let Ok(sink) = Sink::try_new(&stream_handle) else {
                    return;
                };

                let source = SineWave::new(tone.frequency_hz)
                    .take_duration(tone.duration)
                    .amplify(0.1)
                    .delay(tone.delay);
                sink.append(source);
                sink.sleep_until_end();
            })?;
        Ok(())
    }
}
