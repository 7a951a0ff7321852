/// Basic integration tests
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use softday_companion::advice::AdviceCollaborator;
use softday_companion::session::SessionServer;
use softday_companion::storage::STATE_KEY;
use softday_companion::*;
use tempfile::TempDir;

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    fn file_config(dir: &TempDir) -> CompanionConfig {
        CompanionConfig {
            storage: StorageTarget::File(dir.path().join("softday.db")),
            advice: AdviceConfig::default(),
        }
    }

    #[tokio::test]
    async fn test_state_survives_restart() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = file_config(&temp_dir);

        let saved = {
            let mut companion = Companion::open(&config).expect("Failed to open companion");
            let _ = companion.add_task("Repot the basil".to_string()).unwrap();
            let _ = companion.save_journal("Rain all afternoon".to_string()).unwrap();
            let _ = companion.add_ritual(RitualDraft {
                name: "Tea".to_string(),
                time: RitualTime::Custom("After lunch".to_string()),
                symbol: RitualSymbol::Brew,
                ..RitualDraft::default()
            });
            let _ = companion.update_settings(Settings {
                theme: Theme::Night,
                soundscape: Soundscape::Silence,
            });
            companion.state().clone()
        };

        let reopened = Companion::open(&config).expect("Failed to reopen companion");
        assert_eq!(reopened.state(), &saved);
        assert_eq!(reopened.state().tasks.len(), 3);
        assert_eq!(reopened.state().rituals[2].time.label(), "After lunch");
    }

    #[tokio::test]
    async fn test_corrupt_database_document_falls_back_to_seed() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("softday.db");

        let backend = SqliteKeyValueStore::new(db_path.clone()).unwrap();
        backend.put(STATE_KEY, r#"{"tasks": "not a list"}"#).unwrap();
        drop(backend);

        let companion = Companion::open(&CompanionConfig {
            storage: StorageTarget::File(db_path.clone()),
            advice: AdviceConfig::default(),
        })
        .unwrap();
        assert_eq!(companion.state().tasks.len(), 2);
        assert_eq!(companion.state().rituals.len(), 2);

        // The seed replaced the unreadable document
        let persistence = StatePersistence::new(SqliteKeyValueStore::new(db_path).unwrap());
        assert!(persistence.load().unwrap().is_some());
    }

    #[tokio::test]
    async fn test_pending_advice_resumes_after_restart() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("softday.db");

        let mut pending = AppState::seed();
        pending.mood = Some(Mood::Dissatisfied);
        pending.mood_advice = Some(ADVICE_PENDING.to_string());
        StatePersistence::new(SqliteKeyValueStore::new(db_path.clone()).unwrap())
            .save(&pending)
            .unwrap();

        let mut companion = Companion::new(
            Store::open(StatePersistence::new(SqliteKeyValueStore::new(db_path).unwrap())),
            AdviceCollaborator::offline(),
        );
        let ticket = companion.resume_pending_advice().expect("pending advice should resume");
        assert_eq!(ticket.mood, Mood::Dissatisfied);

        let resolution = companion.next_advice().await.unwrap();
        assert!(companion.apply_advice(resolution).value);
        assert!(!companion.state().advice_pending());
        assert_eq!(companion.state().mood, Some(Mood::Dissatisfied));
    }

    #[tokio::test]
    async fn test_session_workflow_over_lines() {
        let companion = Companion::with_provider(
            MemoryKeyValueStore::new(),
            Arc::new(advice::OfflineAdviceProvider::new()),
            Duration::from_secs(1),
        );
        let mut session = SessionServer::new(companion);

        let requests = [
            json!({"jsonrpc": "2.0", "id": 1, "method": "navigate", "params": {"intent": "start"}}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "navigate", "params": {"intent": "open", "screen": "JOURNAL_WRITE"}}),
            json!({"jsonrpc": "2.0", "id": 3, "method": "journal/save", "params": {"content": "Slow tea, long shadows"}}),
            json!({"jsonrpc": "2.0", "id": 4, "method": "profile/update", "params": {"name": "Mika", "avatar": "https://example.test/mika.png"}}),
            json!({"jsonrpc": "2.0", "id": 5, "method": "stats/get"}),
        ];
        let input: String = requests.iter().map(|r| format!("{}\n", r)).collect();
        let mut output = Vec::new();

        session.serve(input.as_bytes(), &mut output).await.unwrap();

        let responses: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .filter(|message: &Value| message.get("id").is_some())
            .collect();
        assert_eq!(responses.len(), 5);
        assert_eq!(responses[1]["result"]["screen"], json!("JOURNAL_WRITE"));
        assert_eq!(responses[2]["result"]["screen"], json!("JOURNALS_LIST"));
        assert_eq!(responses[3]["result"]["value"]["name"], json!("Mika"));
        assert_eq!(responses[4]["result"]["journalCount"], json!(1));

        let state = session.companion().state();
        assert_eq!(state.profile.name, "Mika");
        assert_eq!(state.journals[0].content, "Slow tea, long shadows");
    }

    #[test]
    fn test_write_failure_keeps_session_going() {
        let backend = MemoryKeyValueStore::new();
        let mut store = Store::open(StatePersistence::new(backend));
        store.persistence().backend().set_reject_writes(true);

        let applied = store.save_journal("Written offline".to_string()).unwrap();
        assert!(!applied.is_durable());
        assert!(matches!(applied.warning, Some(StorageError::WriteRejected(_))));
        assert_eq!(store.state().journals.len(), 1);
    }
}
