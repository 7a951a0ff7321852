/// Basic unit tests against the public API
use softday_companion::navigation::{transition, BreathCycle, BreathPhase, BREATH_PHASE_DURATION};
use softday_companion::*;

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    fn memory_store() -> Store<MemoryKeyValueStore> {
        Store::open(StatePersistence::new(MemoryKeyValueStore::new()))
    }

    #[test]
    fn test_default_seed() {
        let state = AppState::seed();

        assert_eq!(state.tasks.len(), 2);
        assert!(state.tasks.iter().all(|t| !t.completed));
        assert_eq!(state.rituals.len(), 2);
        assert!(state.rituals.iter().all(|r| r.checked));
        assert!(state.journals.is_empty());
        assert!(state.custom_sounds.is_empty());
        assert_eq!(state.settings.theme, Theme::Morning);
        assert_eq!(state.settings.soundscape, Soundscape::Silence);
        assert!(state.mood.is_none());
        assert!(state.mood_advice.is_none());
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_toggle_twice_restores_task() {
        let mut store = memory_store();
        let before = store.state().tasks.clone();
        let id = before[0].id.clone();

        assert!(store.toggle_task(&id).value);
        assert!(store.toggle_task(&id).value);
        assert_eq!(store.state().tasks, before);
    }

    #[test]
    fn test_toggle_twice_restores_ritual() {
        let mut store = memory_store();
        let before = store.state().rituals.clone();
        let id = before[1].id.clone();

        let _ = store.toggle_ritual(&id);
        assert!(!store.state().rituals[1].checked);
        let _ = store.toggle_ritual(&id);
        assert_eq!(store.state().rituals, before);
    }

    #[test]
    fn test_unknown_ids_change_nothing() {
        let mut store = memory_store();
        let mut rx = store.subscribe();
        let before = store.state().clone();

        assert!(!store.toggle_task(&TaskId::from("missing")).value);
        assert!(!store.toggle_ritual(&RitualId::from("missing")).value);
        assert!(!store.remove_custom_sound(&SoundId::from("custom_missing")).value);

        assert_eq!(store.state(), &before);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_journal_newest_first() {
        let mut store = memory_store();
        let first = store.save_journal("Morning pages".to_string()).unwrap().into_value();
        let second = store.save_journal("Evening pages".to_string()).unwrap().into_value();

        let ids: Vec<&JournalId> = store.state().journals.iter().map(|j| &j.id).collect();
        assert_eq!(ids, vec![&second.id, &first.id]);
    }

    #[test]
    fn test_added_task_uses_defaults() {
        let mut store = memory_store();
        let task = store.add_task("Call grandma".to_string()).unwrap().into_value();

        assert_eq!(task.subtext.as_deref(), Some(USER_TASK_SUBTEXT));
        assert_eq!(task.color, USER_TASK_COLOR);
        assert_eq!(task.icon, USER_TASK_ICON);
        assert!(!task.completed);
        assert_eq!(store.state().tasks.last(), Some(&task));
    }

    #[test]
    fn test_ritual_draft_defaults() {
        let mut store = memory_store();
        let ritual = store
            .add_ritual(RitualDraft {
                name: "  ".to_string(),
                intention: String::new(),
                ..RitualDraft::default()
            })
            .into_value();

        assert_eq!(ritual.name, UNTITLED_RITUAL);
        assert_eq!(ritual.intention, DEFAULT_INTENTION);
        assert!(ritual.checked);
    }

    #[test]
    fn test_removing_selected_sound_falls_back_to_silence() {
        let mut store = memory_store();
        let upload =
            CustomSound::from_upload("birdsong.mp3", "data:audio/mpeg;base64,AA".to_string())
                .unwrap();
        let sound = store.add_custom_sound(upload).unwrap().into_value();
        let _ = store.update_settings(Settings {
            theme: Theme::Evening,
            soundscape: Soundscape::Sound(sound.id.clone()),
        });

        assert!(store.remove_custom_sound(&sound.id).value);
        assert!(store.state().custom_sounds.is_empty());
        assert_eq!(store.state().settings.soundscape, Soundscape::Silence);
        assert_eq!(store.state().settings.theme, Theme::Evening);
        assert_eq!(resolve_soundscape(store.state()), PlaybackSource::Silence);
    }

    #[test]
    fn test_back_targets() {
        assert_eq!(transition(Screen::CreateRitual, NavIntent::Back), Screen::Nudges);
        assert_eq!(transition(Screen::PrivacyManifesto, NavIntent::Back), Screen::Settings);
        assert_eq!(transition(Screen::Settings, NavIntent::Back), Screen::Profile);
        assert_eq!(transition(Screen::Reflection, NavIntent::Back), Screen::Home);
        assert_eq!(transition(Screen::Profile, NavIntent::Logout), Screen::Welcome);
        assert_eq!(transition(Screen::Welcome, NavIntent::Start), Screen::Home);
    }

    #[test]
    fn test_bottom_nav_visibility() {
        assert!(Screen::Home.shows_bottom_nav());
        assert!(Screen::Nudges.shows_bottom_nav());
        assert!(!Screen::Welcome.shows_bottom_nav());
        assert!(!Screen::Reflection.shows_bottom_nav());
        assert_eq!(NavTab::Rituals.screen(), Screen::Nudges);
    }

    #[test]
    fn test_breathing_cycle_phases() {
        let mut cycle = BreathCycle::new();
        assert_eq!(cycle.phase(), BreathPhase::Inhale);

        cycle.advance(BREATH_PHASE_DURATION);
        assert_eq!(cycle.phase(), BreathPhase::Hold);
        assert_eq!(BreathPhase::Exhale.next(), BreathPhase::Inhale);
    }
}
