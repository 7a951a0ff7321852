/// Settings, profile and custom sound operations
use crate::domain::{CustomSound, DomainError, Profile, Settings, SoundId, Soundscape};
use crate::storage::KeyValueStore;
use crate::store::{Applied, Store};

impl<K: KeyValueStore> Store<K> {
    /// Replace the settings record
    ///
    /// A sound selection naming the silence sentinel is stored as silence.
    pub fn update_settings(&mut self, mut settings: Settings) -> Applied<Settings> {
        self.recover_stored_state();
        settings.soundscape = Soundscape::from(String::from(settings.soundscape));

        let mut next = self.state.clone();
        next.settings = settings.clone();

        tracing::debug!("Settings updated: theme {:?}", settings.theme);
        self.commit(next, settings)
    }

    /// Replace the profile record, keeping the original join date
    pub fn update_profile(&mut self, profile: Profile) -> Applied<Profile> {
        self.recover_stored_state();
        let profile = self.state.profile.replaced_by(profile);

        let mut next = self.state.clone();
        next.profile = profile.clone();

        self.commit(next, profile)
    }

    /// Append an uploaded sound
    ///
    /// The id must be non-blank, unique among the custom sounds and distinct
    /// from the silence sentinel; the data must not be empty.
    pub fn add_custom_sound(
        &mut self,
        sound: CustomSound,
    ) -> Result<Applied<CustomSound>, DomainError> {
        self.recover_stored_state();
        if sound.id.is_blank() {
            return Err(DomainError::BlankId { kind: "sound".to_string() });
        }
        if sound.id.as_str() == Soundscape::SILENCE {
            return Err(DomainError::InvalidValue {
                message: format!("'{}' is reserved for the silent soundscape", sound.id),
            });
        }
        if sound.data.is_empty() {
            return Err(DomainError::InvalidValue {
                message: "Sound data cannot be empty".to_string(),
            });
        }
        if self.state.custom_sounds.iter().any(|s| s.id == sound.id) {
            return Err(DomainError::DuplicateId {
                kind: "sound".to_string(),
                id: sound.id.to_string(),
            });
        }

        let mut next = self.state.clone();
        next.custom_sounds.push(sound.clone());

        tracing::debug!("Added custom sound {} ({})", sound.name, sound.id);
        Ok(self.commit(next, sound))
    }

    /// Remove a sound by id
    ///
    /// If it was the selected soundscape, the selection falls back to
    /// silence in the same snapshot. Unknown ids are a no-op.
    pub fn remove_custom_sound(&mut self, id: &SoundId) -> Applied<bool> {
        self.recover_stored_state();
        if !self.state.custom_sounds.iter().any(|s| &s.id == id) {
            return Applied::clean(false);
        }

        let mut next = self.state.clone();
        next.custom_sounds.retain(|s| &s.id != id);
        if next.settings.soundscape.selects(id) {
            tracing::info!("Selected soundscape {} removed, falling back to silence", id);
            next.settings.soundscape = Soundscape::Silence;
        }

        self.commit(next, true)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use crate::domain::{CustomSound, DomainError, Profile, Settings, SoundId, Soundscape, Theme};
    use crate::store::tests::memory_store;

    fn sound(id: &str) -> CustomSound {
        CustomSound {
            id: SoundId::from(id),
            name: "Rain".to_string(),
            data: "data:audio/mpeg;base64,AAAA".to_string(),
        }
    }

    #[test]
    fn test_update_settings_replaces_record() {
        let mut store = memory_store();
        let settings = Settings {
            theme: Theme::Night,
            soundscape: Soundscape::Silence,
        };

        let _ = store.update_settings(settings.clone());
        assert_eq!(store.state().settings, settings);
    }

    #[test]
    fn test_update_profile_keeps_join_date() {
        let mut store = memory_store();
        let joined = store.state().profile.join_date;

        let applied = store.update_profile(Profile {
            name: "Ren".to_string(),
            avatar: "data:image/png;base64,BBBB".to_string(),
            join_date: joined - Duration::days(400),
        });

        assert_eq!(applied.value.name, "Ren");
        assert_eq!(store.state().profile.join_date, joined);
    }

    #[test]
    fn test_removing_selected_sound_resets_soundscape() {
        let mut store = memory_store();
        let _ = store.add_custom_sound(sound("custom_1")).unwrap();
        let _ = store.update_settings(Settings {
            theme: Theme::Evening,
            soundscape: Soundscape::Sound(SoundId::from("custom_1")),
        });

        assert!(store.remove_custom_sound(&SoundId::from("custom_1")).value);
        assert!(store.state().custom_sounds.is_empty());
        assert_eq!(store.state().settings.soundscape, Soundscape::Silence);
        assert_eq!(store.state().settings.theme, Theme::Evening);
    }

    #[test]
    fn test_removing_other_sound_keeps_selection() {
        let mut store = memory_store();
        let _ = store.add_custom_sound(sound("custom_1")).unwrap();
        let _ = store.add_custom_sound(sound("custom_2")).unwrap();
        let selected = Soundscape::Sound(SoundId::from("custom_2"));
        let _ = store.update_settings(Settings {
            theme: Theme::Morning,
            soundscape: selected.clone(),
        });

        let _ = store.remove_custom_sound(&SoundId::from("custom_1"));
        assert_eq!(store.state().settings.soundscape, selected);
        assert_eq!(store.state().custom_sounds.len(), 1);
    }

    #[test]
    fn test_remove_unknown_sound_is_noop() {
        let mut store = memory_store();
        assert!(!store.remove_custom_sound(&SoundId::from("custom_404")).value);
    }

    #[test]
    fn test_duplicate_sound_id_is_rejected() {
        let mut store = memory_store();
        let _ = store.save_journal("Rain on the window".to_string()).unwrap();
        let _ = store.add_custom_sound(sound("custom_1")).unwrap();

        let second = store.add_custom_sound(sound("custom_1"));
        assert!(matches!(second, Err(DomainError::DuplicateId { .. })));
        assert_eq!(store.state().custom_sounds.len(), 1);

        let saved = store.persistence().load().unwrap().unwrap();
        assert_eq!(saved.custom_sounds.len(), 1);
        assert_eq!(saved.journals.len(), 1);
    }

    #[test]
    fn test_malformed_sounds_are_rejected() {
        let mut store = memory_store();

        let blank = store.add_custom_sound(sound("  "));
        assert!(matches!(blank, Err(DomainError::BlankId { .. })));

        let sentinel = store.add_custom_sound(sound(Soundscape::SILENCE));
        assert!(matches!(sentinel, Err(DomainError::InvalidValue { .. })));

        let mut empty = sound("custom_1");
        empty.data.clear();
        assert!(matches!(
            store.add_custom_sound(empty),
            Err(DomainError::InvalidValue { .. })
        ));

        assert!(store.state().custom_sounds.is_empty());
        assert!(store.persistence().load().unwrap().is_some());
    }

    #[test]
    fn test_silence_named_selection_reloads_unchanged() {
        let mut store = memory_store();
        let applied = store.update_settings(Settings {
            theme: Theme::Night,
            soundscape: Soundscape::Sound(SoundId::from(Soundscape::SILENCE)),
        });

        assert_eq!(applied.value.soundscape, Soundscape::Silence);
        let loaded = store.persistence().load().unwrap().unwrap();
        assert_eq!(&loaded, store.state());
    }
}
