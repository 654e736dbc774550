use std::time::{Duration, Instant};

use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

/// How long one beep lasts
const BURST: Duration = Duration::from_millis(100);

struct SquareWave {
    phase_inc: f32,
    phase: f32,
    volume: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase <= 0.5 {
                self.volume
            } else {
                -self.volume
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// # Beeper
///
/// A square-wave tone generator for the machine's single sound effect. The
/// device sits paused; each beep resumes it for a short burst and `update`
/// pauses it again once the burst is over.
pub struct Beeper {
    device: AudioDevice<SquareWave>,
    silence_at: Option<Instant>,
}

impl Beeper {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        let audio = sdl.audio()?;
        let spec = AudioSpecDesired {
            freq: Some(44_100),
            channels: Some(1),
            samples: None,
        };
        let device = audio.open_playback(None, &spec, |spec| SquareWave {
            phase_inc: 440.0 / spec.freq as f32,
            phase: 0.0,
            volume: 0.05,
        })?;
        Ok(Beeper {
            device,
            silence_at: None,
        })
    }

    /// Starts (or extends) a tone burst.
    pub fn beep(&mut self) {
        self.device.resume();
        self.silence_at = Some(Instant::now() + BURST);
    }

    /// Pauses the device once the current burst has run its course.
    pub fn update(&mut self) {
        if let Some(deadline) = self.silence_at {
            if Instant::now() >= deadline {
                self.device.pause();
                self.silence_at = None;
            }
        }
    }
}
