//! Web Audio backend
//!
//! Owns one oscillator + gain pair per `Tone`, started once and never stopped.

use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

use super::{AudioCommand, Tone, ToneBank, Waveform};

fn oscillator_type(waveform: Waveform) -> OscillatorType {
    match waveform {
        Waveform::Square => OscillatorType::Square,
        Waveform::Triangle => OscillatorType::Triangle,
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Sawtooth => OscillatorType::Sawtooth,
    }
}

/// Running tone generators
pub struct WebAudio {
    ctx: AudioContext,
    voices: Vec<(OscillatorNode, GainNode)>,
}

impl WebAudio {
    /// Create the context and start all generators at their initial gain.
    ///
    /// Returns None (audio disabled) if the browser refuses.
    pub fn new(bank: &ToneBank) -> Option<Self> {
        let Ok(ctx) = AudioContext::new() else {
            log::warn!("Failed to create AudioContext - audio disabled");
            return None;
        };

        let mut voices = Vec::with_capacity(Tone::ALL.len());
        for tone in Tone::ALL {
            let Some(voice) = Self::create_voice(&ctx, tone, bank.initial_gain(tone)) else {
                log::warn!("Failed to create {:?} oscillator - audio disabled", tone);
                return None;
            };
            voices.push(voice);
        }

        Some(Self { ctx, voices })
    }

    /// Create a started oscillator routed through its own gain node
    fn create_voice(ctx: &AudioContext, tone: Tone, gain_value: f32) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(oscillator_type(tone.waveform()));
        gain.gain().set_value(gain_value);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;
        osc.start().ok()?;

        Some((osc, gain))
    }

    /// Resume the context after a user gesture; no-op while already running
    pub fn resume(&self) {
        if self.ctx.state() != AudioContextState::Running {
            let _ = self.ctx.resume();
        }
    }

    pub fn apply(&self, commands: &[AudioCommand]) {
        let t = self.ctx.current_time();
        for command in commands {
            match *command {
                AudioCommand::SetFrequency { tone, hz } => {
                    let (osc, _) = &self.voices[tone.index()];
                    osc.frequency().set_value_at_time(hz, t).ok();
                }
                AudioCommand::RampGain {
                    tone,
                    target,
                    ramp_secs,
                } => {
                    let (_, gain) = &self.voices[tone.index()];
                    let param = gain.gain();
                    param.cancel_scheduled_values(t).ok();
                    param.set_value_at_time(param.value(), t).ok();
                    param
                        .linear_ramp_to_value_at_time(target, t + ramp_secs as f64)
                        .ok();
                }
                AudioCommand::Release {
                    tone,
                    peak,
                    delay_secs,
                    ramp_secs,
                } => {
                    // Queued on the audio clock; the next RampGain on this tone cancels it
                    let (_, gain) = &self.voices[tone.index()];
                    let param = gain.gain();
                    let start = t + delay_secs as f64;
                    param.set_value_at_time(peak, start).ok();
                    param
                        .linear_ramp_to_value_at_time(0.0, start + ramp_secs as f64)
                        .ok();
                }
            }
        }
    }
}
