//! Audio cue layer
//!
//! Four always-running tone generators, silent until cued. A cue sets the pitch,
//! ramps the gain up and schedules the release on the audio clock, so a blip
//! decays even when no frames run (hidden tab). The background arpeggio steps
//! through `MUSIC_NOTES` on its own clock, sampled by `ToneBank::poll`.
//!
//! `ToneBank` only produces `AudioCommand`s; the `web` backend plays them.

#[cfg(target_arch = "wasm32")]
pub mod web;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{MUSIC_AMPLITUDE, MUSIC_NOTES, MUSIC_STEP_MS};
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Tone generators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Ball hits paddle
    Bounce,
    /// Paddle moved
    Move,
    /// Ball lost
    GameOver,
    /// Background arpeggio
    Music,
}

impl Tone {
    pub const ALL: [Tone; 4] = [Tone::Bounce, Tone::Move, Tone::GameOver, Tone::Music];

    pub fn index(self) -> usize {
        match self {
            Tone::Bounce => 0,
            Tone::Move => 1,
            Tone::GameOver => 2,
            Tone::Music => 3,
        }
    }

    pub fn waveform(self) -> Waveform {
        match self {
            Tone::Bounce => Waveform::Square,
            Tone::Move => Waveform::Triangle,
            Tone::GameOver => Waveform::Sine,
            Tone::Music => Waveform::Sawtooth,
        }
    }

    /// Pitch and envelope for cueable tones (the arpeggio is never cued)
    pub fn cue(self) -> Option<Cue> {
        match self {
            Tone::Bounce => Some(Cue {
                pitch: Pitch::Fixed(400.0),
                envelope: Envelope {
                    peak: 0.2,
                    attack_secs: 0.05,
                    hold_ms: 50.0,
                    release_secs: 0.05,
                },
            }),
            Tone::Move => Some(Cue {
                pitch: Pitch::Random {
                    low: 200.0,
                    high: 300.0,
                },
                envelope: Envelope {
                    peak: 0.1,
                    attack_secs: 0.05,
                    hold_ms: 50.0,
                    release_secs: 0.1,
                },
            }),
            Tone::GameOver => Some(Cue {
                pitch: Pitch::Fixed(100.0),
                envelope: Envelope {
                    peak: 0.3,
                    attack_secs: 0.1,
                    hold_ms: 400.0,
                    release_secs: 0.4,
                },
            }),
            Tone::Music => None,
        }
    }

    /// Tone cued by a gameplay event, if any
    pub fn for_event(event: &GameEvent) -> Option<Tone> {
        match event {
            GameEvent::Bounce { .. } => Some(Tone::Bounce),
            GameEvent::PaddleMoved => Some(Tone::Move),
            GameEvent::GameOver { .. } => Some(Tone::GameOver),
            GameEvent::GameStarted | GameEvent::ReturnedToMenu => None,
        }
    }
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Square,
    Triangle,
    Sine,
    Sawtooth,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pitch {
    Fixed(f32),
    /// Uniform in `[low, high)` on every cue
    Random { low: f32, high: f32 },
}

/// Attack to `peak`, hold, then release to silence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub peak: f32,
    pub attack_secs: f32,
    pub hold_ms: f64,
    pub release_secs: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    pub pitch: Pitch,
    pub envelope: Envelope,
}

/// Instruction for the audio backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCommand {
    SetFrequency { tone: Tone, hz: f32 },
    /// Linear gain ramp from the current value to `target` over `ramp_secs`.
    /// Cancels anything still scheduled on the tone.
    RampGain { tone: Tone, target: f32, ramp_secs: f32 },
    /// Hold `peak` until `delay_secs` from now, then ramp to silence over `ramp_secs`
    Release {
        tone: Tone,
        peak: f32,
        delay_secs: f32,
        ramp_secs: f32,
    },
}

/// Background arpeggio clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MusicLoop {
    /// Notes played so far
    index: usize,
    next_step_at: f64,
}

impl MusicLoop {
    pub fn new(now: f64) -> Self {
        Self {
            index: 0,
            next_step_at: now + MUSIC_STEP_MS,
        }
    }

    /// Note to switch to at `now`, if a step boundary passed.
    ///
    /// After a long stall only the latest note is returned.
    pub fn advance(&mut self, now: f64) -> Option<f32> {
        if now < self.next_step_at {
            return None;
        }
        let steps = ((now - self.next_step_at) / MUSIC_STEP_MS).floor() as usize + 1;
        self.index += steps;
        self.next_step_at += steps as f64 * MUSIC_STEP_MS;
        Some(MUSIC_NOTES[(self.index - 1) % MUSIC_NOTES.len()])
    }
}

/// Cue scheduler for the four tone generators
#[derive(Debug, Clone)]
pub struct ToneBank {
    music: MusicLoop,
    sfx_gain: f32,
    music_gain: f32,
    rng: Pcg32,
}

impl ToneBank {
    pub fn new(settings: &Settings, seed: u64, now: f64) -> Self {
        Self {
            music: MusicLoop::new(now),
            sfx_gain: settings.sfx_gain(),
            music_gain: settings.music_gain(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Gain a generator should start at
    pub fn initial_gain(&self, tone: Tone) -> f32 {
        match tone {
            Tone::Music => MUSIC_AMPLITUDE * self.music_gain,
            _ => 0.0,
        }
    }

    /// Start a blip on `tone`; its release replaces any pending one
    pub fn cue(&mut self, tone: Tone) -> Vec<AudioCommand> {
        let Some(cue) = tone.cue() else {
            return Vec::new();
        };
        let hz = match cue.pitch {
            Pitch::Fixed(hz) => hz,
            Pitch::Random { low, high } => self.rng.random_range(low..high),
        };
        let env = cue.envelope;
        let peak = env.peak * self.sfx_gain;
        // Release never starts before the attack has finished
        let delay_secs = ((env.hold_ms / 1000.0) as f32).max(env.attack_secs);
        vec![
            AudioCommand::SetFrequency { tone, hz },
            AudioCommand::RampGain {
                tone,
                target: peak,
                ramp_secs: env.attack_secs,
            },
            AudioCommand::Release {
                tone,
                peak,
                delay_secs,
                ramp_secs: env.release_secs,
            },
        ]
    }

    /// Cues for a batch of gameplay events
    pub fn cue_events(&mut self, events: &[GameEvent]) -> Vec<AudioCommand> {
        events
            .iter()
            .filter_map(Tone::for_event)
            .flat_map(|tone| self.cue(tone))
            .collect()
    }

    /// The arpeggio step due at `now`, if any
    pub fn poll(&mut self, now: f64) -> Vec<AudioCommand> {
        let mut commands = Vec::new();
        if let Some(hz) = self.music.advance(now) {
            commands.push(AudioCommand::SetFrequency {
                tone: Tone::Music,
                hz,
            });
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn bank() -> ToneBank {
        ToneBank::new(&Settings { master_volume: 1.0, ..Default::default() }, 5, 0.0)
    }

    fn gain_targets(commands: &[AudioCommand], tone: Tone) -> Vec<f32> {
        commands
            .iter()
            .filter_map(|c| match c {
                AudioCommand::RampGain { tone: t, target, .. } if *t == tone => Some(*target),
                _ => None,
            })
            .collect()
    }

    fn releases(commands: &[AudioCommand], tone: Tone) -> Vec<(f32, f32, f32)> {
        commands
            .iter()
            .filter_map(|c| match c {
                AudioCommand::Release {
                    tone: t,
                    peak,
                    delay_secs,
                    ramp_secs,
                } if *t == tone => Some((*peak, *delay_secs, *ramp_secs)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_bounce_cue_and_release() {
        let mut bank = bank();
        let commands = bank.cue(Tone::Bounce);
        assert_eq!(
            commands,
            vec![
                AudioCommand::SetFrequency {
                    tone: Tone::Bounce,
                    hz: 400.0
                },
                AudioCommand::RampGain {
                    tone: Tone::Bounce,
                    target: 0.2,
                    ramp_secs: 0.05
                },
                AudioCommand::Release {
                    tone: Tone::Bounce,
                    peak: 0.2,
                    delay_secs: 0.05,
                    ramp_secs: 0.05
                },
            ]
        );
    }

    #[test]
    fn test_release_is_scheduled_with_the_cue() {
        let mut bank = bank();
        let commands = bank.cue(Tone::GameOver);
        // Release travels with the cue; nothing is left for frame polling
        let found = releases(&commands, Tone::GameOver);
        let &[(peak, delay, ramp)] = found.as_slice() else {
            panic!("expected one release, got {commands:?}");
        };
        assert_eq!(peak, 0.3);
        assert!((delay - 0.4).abs() < 1e-6);
        assert_eq!(ramp, 0.4);
        assert!(bank.poll(10_000.0).iter().all(|c| matches!(
            c,
            AudioCommand::SetFrequency {
                tone: Tone::Music,
                ..
            }
        )));
    }

    #[test]
    fn test_recue_restarts_attack_before_release() {
        let mut bank = bank();
        bank.cue(Tone::Move);
        let commands = bank.cue(Tone::Move);
        // The attack ramp cancels the earlier release before the new one is queued
        let attack = commands
            .iter()
            .position(|c| matches!(c, AudioCommand::RampGain { .. }));
        let release = commands
            .iter()
            .position(|c| matches!(c, AudioCommand::Release { .. }));
        assert!(matches!((attack, release), (Some(a), Some(r)) if a < r));
    }

    #[test]
    fn test_move_pitch_is_random_in_range() {
        let mut bank = bank();
        for _ in 0..50 {
            let commands = bank.cue(Tone::Move);
            let AudioCommand::SetFrequency { hz, .. } = commands[0] else {
                panic!("expected a frequency first");
            };
            assert!((200.0..300.0).contains(&hz));
        }
    }

    #[test]
    fn test_music_never_cued() {
        let mut bank = bank();
        assert!(bank.cue(Tone::Music).is_empty());
        assert_eq!(bank.initial_gain(Tone::Music), MUSIC_AMPLITUDE);
        assert_eq!(bank.initial_gain(Tone::Bounce), 0.0);
    }

    #[test]
    fn test_music_loop_cycles_notes() {
        let mut music = MusicLoop::new(0.0);
        assert_eq!(music.advance(299.0), None);
        let notes: Vec<f32> = (1..=6)
            .filter_map(|i| music.advance(i as f64 * MUSIC_STEP_MS))
            .collect();
        assert_eq!(notes, vec![220.0, 330.0, 440.0, 550.0, 660.0, 220.0]);
    }

    #[test]
    fn test_music_loop_skips_after_stall() {
        let mut music = MusicLoop::new(0.0);
        // Steps at 300, 600, 900 all passed: third note only
        assert_eq!(music.advance(950.0), Some(440.0));
        assert_eq!(music.advance(1199.0), None);
        assert_eq!(music.advance(1200.0), Some(550.0));
    }

    #[test]
    fn test_volume_scales_cues() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            ..Default::default()
        };
        let mut bank = ToneBank::new(&settings, 1, 0.0);
        let commands = bank.cue(Tone::GameOver);
        assert_eq!(gain_targets(&commands, Tone::GameOver), vec![0.3 * 0.25]);
        assert_eq!(releases(&commands, Tone::GameOver)[0].0, 0.3 * 0.25);

        let muted = Settings {
            muted: true,
            ..Default::default()
        };
        let mut bank = ToneBank::new(&muted, 1, 0.0);
        assert_eq!(gain_targets(&bank.cue(Tone::Bounce), Tone::Bounce), vec![0.0]);
        assert_eq!(bank.initial_gain(Tone::Music), 0.0);
    }

    #[test]
    fn test_events_map_to_cues() {
        let mut bank = bank();
        let events = [
            GameEvent::GameStarted,
            GameEvent::Bounce {
                at: Vec2::ZERO,
                score: 1,
            },
            GameEvent::PaddleMoved,
            GameEvent::GameOver {
                score: 1,
                high_score: 1,
                new_record: true,
            },
            GameEvent::ReturnedToMenu,
        ];
        let commands = bank.cue_events(&events);
        assert_eq!(commands.len(), 9);
        assert_eq!(gain_targets(&commands, Tone::Bounce), vec![0.2]);
        assert_eq!(gain_targets(&commands, Tone::Move), vec![0.1]);
        assert_eq!(gain_targets(&commands, Tone::GameOver), vec![0.3]);
        assert!(commands.contains(&AudioCommand::SetFrequency {
            tone: Tone::GameOver,
            hz: 100.0
        }));
    }
}
