//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::{DeathCause, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Frog hops one square
    Hop,
    /// Run over by a car
    Squash,
    /// Fell in the river
    Splash,
    /// Carried off the side of the playfield
    SweptAway,
    /// Reached the far row
    Goal,
    /// Snapped up a fly
    Fly,
    /// Out of lives
    GameOver,
}

impl SoundEffect {
    /// Sound for a simulation event
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::Hopped => SoundEffect::Hop,
            GameEvent::Died { cause } => match cause {
                DeathCause::Car => SoundEffect::Squash,
                DeathCause::Drowned => SoundEffect::Splash,
                DeathCause::OutOfBounds => SoundEffect::SweptAway,
            },
            GameEvent::ReachedGoal { .. } => SoundEffect::Goal,
            GameEvent::AteFly { .. } => SoundEffect::Fly,
            GameEvent::GameOver => SoundEffect::GameOver,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play the sound for every event in order
    pub fn play_events(&self, events: &[GameEvent]) {
        for event in events {
            self.play(SoundEffect::for_event(event));
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Hop => self.play_hop(ctx, vol),
            SoundEffect::Squash => self.play_squash(ctx, vol),
            SoundEffect::Splash => self.play_splash(ctx, vol),
            SoundEffect::SweptAway => self.play_swept(ctx, vol),
            SoundEffect::Goal => self.play_goal(ctx, vol),
            SoundEffect::Fly => self.play_fly(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Hop - short rising chirp
    fn play_hop(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.15, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.06)
            .ok();
        osc.frequency().set_value_at_time(300.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(600.0, t + 0.05)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.08).ok();
    }

    /// Squash - low crunch
    fn play_squash(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(40.0, t + 0.25)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }

        // Horn blip
        if let Some((osc, gain)) = self.create_osc(ctx, 440.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }
    }

    /// Splash - falling bubbly sweep
    fn play_splash(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 900.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.4)
            .ok();
        osc.frequency().set_value_at_time(900.0, t).ok();
        osc.frequency().set_value_at_time(500.0, t + 0.05).ok();
        osc.frequency().set_value_at_time(700.0, t + 0.1).ok();
        osc.frequency().set_value_at_time(300.0, t + 0.15).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(80.0, t + 0.4)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.45).ok();
    }

    /// Swept away - long descending whistle
    fn play_swept(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 1200.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.6)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(150.0, t + 0.6)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.65).ok();
    }

    /// Goal - ascending arpeggio
    fn play_goal(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        for (i, freq) in [523.0, 659.0, 784.0, 1047.0].into_iter().enumerate() {
            let start = t + i as f64 * 0.08;
            if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle) {
                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain().set_value_at_time(vol * 0.3, start).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, start + 0.15)
                    .ok();
                osc.start_with_when(start).ok();
                osc.stop_with_when(start + 0.2).ok();
            }
        }
    }

    /// Fly - bright double blip
    fn play_fly(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        for (i, freq) in [1200.0, 1600.0].into_iter().enumerate() {
            let start = t + i as f64 * 0.06;
            if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) {
                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain().set_value_at_time(vol * 0.3, start).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, start + 0.08)
                    .ok();
                osc.start_with_when(start).ok();
                osc.stop_with_when(start + 0.1).ok();
            }
        }
    }

    /// Game over - slow descending tones
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        for (i, freq) in [392.0, 330.0, 262.0, 196.0].into_iter().enumerate() {
            let start = t + i as f64 * 0.25;
            if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) {
                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain().set_value_at_time(vol * 0.2, start).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, start + 0.3)
                    .ok();
                osc.start_with_when(start).ok();
                osc.stop_with_when(start + 0.3).ok();
            }
        }
    }
}
