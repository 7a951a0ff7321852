/// Ritual operations
use crate::domain::{Ritual, RitualDraft, RitualId};
use crate::storage::KeyValueStore;
use crate::store::{Applied, Store};

impl<K: KeyValueStore> Store<K> {
    /// Plant a new ritual (checked, created now) at the end of the list
    pub fn add_ritual(&mut self, draft: RitualDraft) -> Applied<Ritual> {
        self.recover_stored_state();
        let ritual = Ritual::new(draft);

        let mut next = self.state.clone();
        next.rituals.push(ritual.clone());

        tracing::debug!("Planted ritual {} ({})", ritual.name, ritual.id);
        self.commit(next, ritual)
    }

    /// Flip a ritual's `checked` flag; unknown ids are a no-op
    pub fn toggle_ritual(&mut self, id: &RitualId) -> Applied<bool> {
        self.recover_stored_state();
        let Some(index) = self.state.rituals.iter().position(|r| &r.id == id) else {
            tracing::debug!("toggle_ritual: no ritual {}", id);
            return Applied::clean(false);
        };

        let mut next = self.state.clone();
        next.rituals[index] = next.rituals[index].toggled();

        self.commit(next, true)
    }
}
