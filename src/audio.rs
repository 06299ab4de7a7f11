//! Sound effects.
//!
//! A terminal can't mix PCM, so a shot rings the terminal bell. The WAV asset
//! still gates it: if `shot.wav` is missing or not a RIFF/WAVE file the
//! player comes up disabled and every `play` is a no-op.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// An actor fired a projectile
    Shot,
}

/// Fire-and-forget sound output.
pub trait AudioPlayer {
    fn play(&mut self, effect: SoundEffect);
}

/// A validated sound asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundClip {
    pub path: PathBuf,
    /// Size of the RIFF payload in bytes.
    pub data_len: usize,
}

impl SoundClip {
    /// Read `path` and check it is a RIFF/WAVE file.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes =
            fs::read(path).with_context(|| format!("reading sound {}", path.display()))?;
        Self::parse(path, &bytes)
    }

    fn parse(path: &Path, bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 12 {
            bail!("{} is too short to be a WAV file", path.display());
        }
        if &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
            bail!("{} is not a RIFF/WAVE file", path.display());
        }
        Ok(SoundClip {
            path: path.to_path_buf(),
            data_len: bytes.len() - 8,
        })
    }
}

/// Audio manager for the game
pub struct AudioManager<W: Write> {
    shot: Option<SoundClip>,
    out: W,
}

impl<W: Write> AudioManager<W> {
    pub fn new(out: W, shot: Option<SoundClip>) -> Self {
        Self { shot, out }
    }

    /// Load the shot sound from `path`; on failure log it and stay silent.
    pub fn from_asset(out: W, path: &Path) -> Self {
        let shot = match SoundClip::load(path) {
            Ok(clip) => {
                log::info!("Loaded sound {} ({} bytes)", path.display(), clip.data_len);
                Some(clip)
            }
            Err(e) => {
                log::warn!("Error loading sound: {:#} - audio disabled", e);
                None
            }
        };
        Self::new(out, shot)
    }

    pub fn is_enabled(&self) -> bool {
        self.shot.is_some()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn ring(&mut self) -> io::Result<()> {
        self.out.write_all(b"\x07")?;
        self.out.flush()
    }
}

impl<W: Write> AudioPlayer for AudioManager<W> {
    fn play(&mut self, effect: SoundEffect) {
        if !self.is_enabled() {
            return;
        }
        match effect {
            SoundEffect::Shot => {
                if let Err(e) = self.ring() {
                    log::debug!("Bell failed: {}", e);
                }
            }
        }
    }
}
