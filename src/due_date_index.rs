multiversx_sc::imports!();

use crate::calendar;
use crate::errors::{
    ERR_ENTRY_ALREADY_QUEUED, ERR_ENTRY_NOT_FOUND, ERR_INVALID_MONTH, ERR_INVALID_PARAMETERS,
    ERR_OUT_OF_BOUNDS,
};
use crate::types::QueueEntry;

// ============================================================
// Due-date index
// Singly-linked list in flat storage, ordered by due timestamp.
// Entries are keyed by proposal id; id 0 marks the end of the chain.
// ============================================================

#[multiversx_sc::module]
pub trait DueDateIndexModule {
    // ========================================================
    // INTERNAL: mutation (not exposed as endpoints)
    // ========================================================

    /// Links `id` after every entry due at or before `due_timestamp`.
    fn insert_entry(&self, id: u64, due_timestamp: u64) {
        require!(id != 0, ERR_INVALID_PARAMETERS);
        require!(self.queue_entries(id).is_empty(), ERR_ENTRY_ALREADY_QUEUED);

        let mut previous = 0u64;
        let mut current = self.queue_head().get();
        while current != 0 {
            let entry = self.queue_entries(current).get();
            if entry.due_timestamp > due_timestamp {
                break;
            }
            previous = current;
            current = entry.next;
        }

        self.queue_entries(id).set(QueueEntry {
            due_timestamp,
            next: current,
        });
        if previous == 0 {
            self.queue_head().set(id);
        } else {
            self.queue_entries(previous).update(|entry| entry.next = id);
        }
        self.queue_length().update(|length| *length += 1);

        self.entry_added_event(id, due_timestamp);
    }

    fn remove_entry(&self, id: u64) {
        require!(
            id != 0 && !self.queue_entries(id).is_empty(),
            ERR_ENTRY_NOT_FOUND
        );

        let removed = self.queue_entries(id).get();
        let head = self.queue_head().get();
        if head == id {
            self.queue_head().set(removed.next);
        } else {
            let mut current = head;
            while current != 0 {
                let mut entry = self.queue_entries(current).get();
                if entry.next == id {
                    entry.next = removed.next;
                    self.queue_entries(current).set(&entry);
                    break;
                }
                current = entry.next;
            }
        }

        self.queue_entries(id).clear();
        self.queue_length().update(|length| *length -= 1);

        self.entry_removed_event(id);
    }

    // ========================================================
    // INTERNAL: queries
    // ========================================================

    /// Ids due in the given month, in due order. Stops at the first entry
    /// past the end of the month instead of walking the whole chain.
    fn ids_due_in(&self, month: u8, year: u32) -> ManagedVec<u64> {
        require!((1..=12).contains(&month), ERR_INVALID_MONTH);

        let month_end = calendar::next_month_start(month, year);
        let mut ids = ManagedVec::new();
        let mut current = self.queue_head().get();
        while current != 0 {
            let entry = self.queue_entries(current).get();
            if entry.due_timestamp >= month_end {
                break;
            }
            if calendar::decompose(entry.due_timestamp) == (month, year) {
                ids.push(current);
            }
            current = entry.next;
        }
        ids
    }

    // ========================================================
    // VIEWS
    // ========================================================

    /// (next id, due timestamp) of a queued proposal.
    #[view(getEntry)]
    fn get_entry(&self, id: u64) -> MultiValue2<u64, u64> {
        require!(
            id != 0 && !self.queue_entries(id).is_empty(),
            ERR_ENTRY_NOT_FOUND
        );
        let entry = self.queue_entries(id).get();
        (entry.next, entry.due_timestamp).into()
    }

    /// (id, due timestamp) of the entry at a 0-indexed position.
    #[view(getEntryAt)]
    fn get_entry_at(&self, position: u64) -> MultiValue2<u64, u64> {
        require!(position < self.queue_length().get(), ERR_OUT_OF_BOUNDS);

        let mut current = self.queue_head().get();
        for _ in 0..position {
            current = self.queue_entries(current).get().next;
        }
        let entry = self.queue_entries(current).get();
        (current, entry.due_timestamp).into()
    }

    #[view(getIdsDueIn)]
    fn get_ids_due_in(&self, month: u8, year: u32) -> MultiValueEncoded<u64> {
        let mut result = MultiValueEncoded::new();
        for id in self.ids_due_in(month, year).iter() {
            result.push(id);
        }
        result
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("entryAdded")]
    fn entry_added_event(&self, #[indexed] id: u64, due_timestamp: u64);

    #[event("entryRemoved")]
    fn entry_removed_event(&self, #[indexed] id: u64);

    // ========================================================
    // STORAGE
    // ========================================================

    #[view(getQueueHead)]
    #[storage_mapper("queueHead")]
    fn queue_head(&self) -> SingleValueMapper<u64>;

    #[view(getQueueLength)]
    #[storage_mapper("queueLength")]
    fn queue_length(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("queueEntries")]
    fn queue_entries(&self, id: u64) -> SingleValueMapper<QueueEntry>;

    /// Entries must be due at or after this instant; advanced when a month
    /// is aggregated for settlement.
    #[view(getScheduleHorizon)]
    #[storage_mapper("scheduleHorizon")]
    fn schedule_horizon(&self) -> SingleValueMapper<u64>;
}
