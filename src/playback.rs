/// Soundscape resolution at the audio boundary
///
/// The settings name a soundscape by id. Before anything is played, the id
/// is looked up among the custom sounds; a selection that no longer exists
/// plays as silence.

use serde::Serialize;

use crate::domain::{AppState, SoundId, Soundscape};

/// Playback volume for ambient soundscapes
pub const SOUNDSCAPE_VOLUME: f32 = 0.3;

/// What the audio layer should be doing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlaybackSource {
    Silence,
    Track { id: SoundId, name: String, data: String },
}

/// Resolve the selected soundscape against the available sounds
pub fn resolve_soundscape(state: &AppState) -> PlaybackSource {
    let Soundscape::Sound(id) = &state.settings.soundscape else {
        return PlaybackSource::Silence;
    };

    match state.custom_sounds.iter().find(|s| &s.id == id) {
        Some(sound) => PlaybackSource::Track {
            id: sound.id.clone(),
            name: sound.name.clone(),
            data: sound.data.clone(),
        },
        None => {
            tracing::warn!("Soundscape {} is not among the custom sounds, playing silence", id);
            PlaybackSource::Silence
        }
    }
}

/// Audio output the player drives
pub trait AudioSink {
    /// Start looping `data` at `volume`, replacing whatever was playing
    fn play_looped(&mut self, data: &str, volume: f32);

    fn pause(&mut self);
}

/// Keeps an `AudioSink` in step with the selected soundscape
pub struct SoundscapePlayer<A: AudioSink> {
    sink: A,
    playing: Option<SoundId>,
}

impl<A: AudioSink> SoundscapePlayer<A> {
    pub fn new(sink: A) -> Self {
        Self { sink, playing: None }
    }

    /// React to a new state; only touches the sink when the track changes
    pub fn sync(&mut self, state: &AppState) {
        match resolve_soundscape(state) {
            PlaybackSource::Track { id, data, .. } => {
                if self.playing.as_ref() != Some(&id) {
                    self.sink.play_looped(&data, SOUNDSCAPE_VOLUME);
                    self.playing = Some(id);
                }
            }
            PlaybackSource::Silence => {
                if self.playing.take().is_some() {
                    self.sink.pause();
                }
            }
        }
    }

    pub fn sink(&self) -> &A {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CustomSound;

    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<String>,
    }

    impl AudioSink for RecordingSink {
        fn play_looped(&mut self, data: &str, _volume: f32) {
            self.calls.push(format!("play {}", data));
        }
        fn pause(&mut self) {
            self.calls.push("pause".to_string());
        }
    }

    fn state_with_sound(selected: &str) -> AppState {
        let mut state = AppState::seed();
        state.custom_sounds.push(CustomSound {
            id: SoundId::from("custom_1"),
            name: "Waves".to_string(),
            data: "data:audio/ogg;base64,WAVES".to_string(),
        });
        state.settings.soundscape = Soundscape::from(selected.to_string());
        state
    }

    #[test]
    fn test_resolves_selected_sound() {
        let source = resolve_soundscape(&state_with_sound("custom_1"));
        assert!(matches!(source, PlaybackSource::Track { ref name, .. } if name == "Waves"));
    }

    #[test]
    fn test_dangling_selection_is_silence() {
        assert_eq!(resolve_soundscape(&state_with_sound("custom_9")), PlaybackSource::Silence);
        assert_eq!(resolve_soundscape(&state_with_sound("silence")), PlaybackSource::Silence);
    }

    #[test]
    fn test_player_only_reacts_to_changes() {
        let mut player = SoundscapePlayer::new(RecordingSink::default());
        let playing = state_with_sound("custom_1");

        player.sync(&playing);
        player.sync(&playing);
        player.sync(&state_with_sound("silence"));
        player.sync(&state_with_sound("silence"));

        assert_eq!(
            player.sink().calls,
            vec!["play data:audio/ogg;base64,WAVES".to_string(), "pause".to_string()]
        );
    }
}
