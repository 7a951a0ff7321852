/// Journal operations
use crate::domain::{DomainError, JournalEntry};
use crate::storage::KeyValueStore;
use crate::store::{Applied, Store};

impl<K: KeyValueStore> Store<K> {
    /// Write a journal entry at the front of the list
    ///
    /// The entry's mood is whatever mood is current right now, if any.
    pub fn save_journal(&mut self, content: String) -> Result<Applied<JournalEntry>, DomainError> {
        self.recover_stored_state();
        let entry = JournalEntry::new(content, self.state.mood)?;

        let mut next = self.state.clone();
        next.journals.insert(0, entry.clone());

        tracing::debug!("Saved journal entry {}", entry.id);
        Ok(self.commit(next, entry))
    }
}
