//! Calendar state and its persistence.
//!
//! `CalendarState` is a plain value. `update` turns a state and an
//! `Action` into the next state without touching storage; `Store` owns
//! the state together with its storage and persists the event list after
//! every transition that changed it.

use chrono::{NaiveDate, TimeZone};
use url::Url;

use crate::constants::STORAGE_KEY;
use crate::error::{ShareCalError, ShareCalResult};
use crate::event::{Event, EventRecord, normalize_records};
use crate::form::{self, EventForm};
use crate::grid::{next_month, prev_month};
use crate::ports::Confirm;
use crate::share::parse_shared_snapshot;
use crate::storage::KeyValueStore;

/// Whether the event form is showing, and for which event
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    Closed,
    Open {
        form: EventForm,
        /// `None` when creating a new event
        editing_id: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    pub events: Vec<Event>,
    /// Any date in the month being shown
    pub reference: NaiveDate,
    pub modal: Modal,
}

impl CalendarState {
    pub fn new(events: Vec<Event>, reference: NaiveDate) -> Self {
        CalendarState {
            events,
            reference,
            modal: Modal::Closed,
        }
    }

    pub fn find_event(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    PrevMonth,
    NextMonth,
    GoTo(NaiveDate),
    OpenCreate(NaiveDate),
    OpenEdit(String),
    /// Replace the open form's fields
    EditForm(EventForm),
    CloseModal,
    /// Save the open form and close it
    Save,
    /// Remove an event; confirmation has already happened
    Delete(String),
}

/// Apply `action` to `state`.
///
/// Errors leave the caller's copy of the state as it was: the form stays
/// open with the user's input on a failed save.
pub fn update<Tz: TimeZone>(
    mut state: CalendarState,
    action: Action,
    tz: &Tz,
) -> ShareCalResult<CalendarState> {
    match action {
        Action::PrevMonth => state.reference = prev_month(state.reference),
        Action::NextMonth => state.reference = next_month(state.reference),
        Action::GoTo(date) => state.reference = date,
        Action::OpenCreate(date) => {
            state.modal = Modal::Open {
                form: EventForm::open_create(date),
                editing_id: None,
            };
        }
        Action::OpenEdit(id) => {
            let event = state
                .find_event(&id)
                .ok_or_else(|| ShareCalError::EventNotFound(id.clone()))?;
            state.modal = Modal::Open {
                form: EventForm::open_edit(event, tz),
                editing_id: Some(id),
            };
        }
        Action::EditForm(new_form) => match &mut state.modal {
            Modal::Open { form: open_form, .. } => *open_form = new_form,
            Modal::Closed => {
                return Err(ShareCalError::InvalidForm("No form is open".to_string()));
            }
        },
        Action::CloseModal => state.modal = Modal::Closed,
        Action::Save => {
            let Modal::Open {
                form: open_form,
                editing_id,
            } = &state.modal
            else {
                return Err(ShareCalError::InvalidForm("No form is open".to_string()));
            };
            let mut events = state.events.clone();
            form::save(open_form, editing_id.as_deref(), &mut events, tz)?;
            state.events = events;
            state.modal = Modal::Closed;
        }
        Action::Delete(id) => {
            form::remove_event(&mut state.events, &id);
        }
    }

    Ok(state)
}

/// Startup load.
///
/// A snapshot in `location` wins over storage when it decodes; a malformed
/// one is logged and ignored. Unreadable storage yields an empty list.
/// Returns the events and whether they came from a snapshot.
pub fn load<S: KeyValueStore>(location: Option<&Url>, storage: &S) -> (Vec<Event>, bool) {
    if let Some(url) = location {
        match parse_shared_snapshot(url) {
            Some(Ok(events)) => {
                tracing::debug!(count = events.len(), "loaded events from shared snapshot");
                return (events, true);
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, "ignoring malformed shared snapshot");
            }
            None => {}
        }
    }

    (load_from_storage(storage), false)
}

fn load_from_storage<S: KeyValueStore>(storage: &S) -> Vec<Event> {
    let raw = match storage.get(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!("no stored events, starting empty");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not read stored events, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<EventRecord>>(&raw) {
        Ok(records) => normalize_records(records),
        Err(e) => {
            tracing::warn!(error = %e, "stored events are corrupt, starting empty");
            Vec::new()
        }
    }
}

/// Write the full event list to storage
pub fn persist<S: KeyValueStore>(storage: &mut S, events: &[Event]) -> ShareCalResult<()> {
    let json = serde_json::to_string(events)?;
    storage.set(STORAGE_KEY, &json)
}

/// State plus the collaborators it is persisted through
#[derive(Debug)]
pub struct Store<S: KeyValueStore, Tz: TimeZone> {
    state: CalendarState,
    storage: S,
    tz: Tz,
    from_snapshot: bool,
}

impl<S: KeyValueStore, Tz: TimeZone> Store<S, Tz> {
    /// Load events (see [`load`]) and show the month containing `today`.
    ///
    /// Events adopted from a snapshot are persisted right away so they
    /// survive without the link.
    pub fn open(
        storage: S,
        location: Option<&Url>,
        tz: Tz,
        today: NaiveDate,
    ) -> ShareCalResult<Self> {
        let (events, from_snapshot) = load(location, &storage);

        let mut store = Store {
            state: CalendarState::new(events, today),
            storage,
            tz,
            from_snapshot,
        };

        if from_snapshot {
            persist(&mut store.storage, &store.state.events)?;
        }

        Ok(store)
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    pub fn events(&self) -> &[Event] {
        &self.state.events
    }

    pub fn tz(&self) -> &Tz {
        &self.tz
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Whether `open` adopted the events of a shared snapshot
    pub fn from_snapshot(&self) -> bool {
        self.from_snapshot
    }

    /// Apply `action`, persisting if the event list changed
    pub fn dispatch(&mut self, action: Action) -> ShareCalResult<()> {
        let next = update(self.state.clone(), action, &self.tz)?;
        let changed = next.events != self.state.events;
        self.state = next;

        if changed {
            persist(&mut self.storage, &self.state.events)?;
        }
        Ok(())
    }

    /// Ask `confirm`, then delete. Unknown ids are a no-op without a prompt.
    pub fn request_delete(&mut self, id: &str, confirm: &impl Confirm) -> ShareCalResult<bool> {
        let mut next = self.state.clone();
        if !form::delete_event(&mut next.events, id, confirm) {
            return Ok(false);
        }

        self.state = next;
        persist(&mut self.storage, &self.state.events)?;
        Ok(true)
    }

    /// Add events from outside (e.g. an .ics import), giving new ids to any
    /// that collide with existing events. Returns how many were added.
    pub fn import(&mut self, records: Vec<EventRecord>) -> ShareCalResult<usize> {
        let mut combined: Vec<EventRecord> = self
            .state
            .events
            .iter()
            .cloned()
            .map(EventRecord::from)
            .collect();
        let added = records.len();
        combined.extend(records);

        let mut next = self.state.clone();
        next.events = normalize_records(combined);
        self.state = next;

        persist(&mut self.storage, &self.state.events)?;
        Ok(added)
    }
}
