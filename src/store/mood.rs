/// Mood check-in and the two-phase advice update
///
/// Setting a mood writes the placeholder advice right away and hands back an
/// `AdviceTicket`. Whoever fetches the affirmation returns it together with
/// that ticket; the store applies it only if the ticket is still the latest
/// one issued and its mood is still the current mood.

use serde::Serialize;

use crate::domain::{Mood, ADVICE_PENDING};
use crate::storage::KeyValueStore;
use crate::store::{Applied, Store};

/// Correlation tag for one advice request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdviceTicket {
    pub mood: Mood,
    pub generation: u64,
}

impl<K: KeyValueStore> Store<K> {
    /// Phase one: record the mood and the pending placeholder
    pub fn begin_mood(&mut self, mood: Mood) -> Applied<AdviceTicket> {
        self.recover_stored_state();
        let ticket = self.issue_ticket(mood);

        let mut next = self.state.clone();
        next.mood = Some(mood);
        next.mood_advice = Some(ADVICE_PENDING.to_string());

        tracing::debug!("Mood set to {} (advice request #{})", mood, ticket.generation);
        self.commit(next, ticket)
    }

    /// Phase two: apply fetched advice if its ticket is still current
    ///
    /// Returns `false` (and writes nothing) for stale tickets.
    pub fn resolve_advice(&mut self, ticket: AdviceTicket, advice: String) -> Applied<bool> {
        self.recover_stored_state();
        if !self.is_current(&ticket) {
            tracing::debug!(
                "Dropping stale advice for {} (request #{}, latest #{})",
                ticket.mood,
                ticket.generation,
                self.advice_generation
            );
            return Applied::clean(false);
        }

        let mut next = self.state.clone();
        next.mood_advice = Some(advice);

        self.commit(next, true)
    }

    /// Ticket for a placeholder left over from an earlier session
    ///
    /// When the saved state still shows pending advice for a mood, the fetch
    /// that would have replaced it never completed. This issues a fresh ticket
    /// for that mood without touching the state.
    pub fn resume_pending_advice(&mut self) -> Option<AdviceTicket> {
        let mood = self.state.mood?;
        if !self.state.advice_pending() {
            return None;
        }
        Some(self.issue_ticket(mood))
    }

    fn issue_ticket(&mut self, mood: Mood) -> AdviceTicket {
        self.advice_generation += 1;
        AdviceTicket {
            mood,
            generation: self.advice_generation,
        }
    }

    fn is_current(&self, ticket: &AdviceTicket) -> bool {
        ticket.generation == self.advice_generation && self.state.mood == Some(ticket.mood)
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{AppState, Mood, ADVICE_PENDING};
    use crate::storage::{KeyValueStore, MemoryKeyValueStore, StatePersistence, STATE_KEY};
    use crate::store::tests::memory_store;
    use crate::store::Store;

    #[test]
    fn test_begin_mood_writes_placeholder() {
        let mut store = memory_store();
        let ticket = store.begin_mood(Mood::Neutral).into_value();

        assert_eq!(ticket.mood, Mood::Neutral);
        assert_eq!(store.state().mood, Some(Mood::Neutral));
        assert!(store.state().advice_pending());

        let saved = store.persistence().load().unwrap().unwrap();
        assert_eq!(saved.mood_advice.as_deref(), Some(ADVICE_PENDING));
    }

    #[test]
    fn test_resolve_current_ticket() {
        let mut store = memory_store();
        let ticket = store.begin_mood(Mood::Satisfied).into_value();

        assert!(store.resolve_advice(ticket, "Small steps, soft ground.".to_string()).value);
        assert_eq!(store.state().mood_advice.as_deref(), Some("Small steps, soft ground."));
        assert!(!store.state().advice_pending());

        let saved = store.persistence().load().unwrap().unwrap();
        assert_eq!(saved.mood, Some(Mood::Satisfied));
        assert_eq!(saved.mood_advice.as_deref(), Some("Small steps, soft ground."));
    }

    #[test]
    fn test_stale_advice_is_dropped() {
        let mut store = memory_store();
        let first = store.begin_mood(Mood::Satisfied).into_value();
        let second = store.begin_mood(Mood::Cloudy).into_value();

        let before = store.persistence().backend().get(STATE_KEY).unwrap();
        let mut rx = store.subscribe();

        let stale = store.resolve_advice(first, "for satisfied".to_string());
        assert!(!stale.value);
        assert!(stale.is_durable());
        assert!(store.state().advice_pending());
        assert_eq!(store.persistence().backend().get(STATE_KEY).unwrap(), before);
        assert!(!rx.has_changed().unwrap());

        assert!(store.resolve_advice(second, "for cloudy".to_string()).value);
        assert_eq!(store.state().mood_advice.as_deref(), Some("for cloudy"));
        assert_eq!(store.state().mood, Some(Mood::Cloudy));

        let saved = store.persistence().load().unwrap().unwrap();
        assert_eq!(saved.mood_advice.as_deref(), Some("for cloudy"));
    }

    #[test]
    fn test_same_mood_reselected_drops_older_request() {
        let mut store = memory_store();
        let first = store.begin_mood(Mood::Neutral).into_value();
        let second = store.begin_mood(Mood::Neutral).into_value();

        assert!(!store.resolve_advice(first, "old".to_string()).value);
        assert!(store.resolve_advice(second, "new".to_string()).value);
        assert_eq!(store.state().mood_advice.as_deref(), Some("new"));
    }

    #[test]
    fn test_resume_pending_after_restart() {
        let backend = MemoryKeyValueStore::new();
        let mut saved = AppState::seed();
        saved.mood = Some(Mood::Cloudy);
        saved.mood_advice = Some(ADVICE_PENDING.to_string());
        backend.put(STATE_KEY, &serde_json::to_string(&saved).unwrap()).unwrap();

        let mut store = Store::open(StatePersistence::new(backend));
        let ticket = store.resume_pending_advice().unwrap();
        assert_eq!(ticket.mood, Mood::Cloudy);
        assert!(store.resolve_advice(ticket, "Clouds pass.".to_string()).value);
        assert!(store.resume_pending_advice().is_none());
    }
}
