//! End-to-end flows through the store: create, edit, delete, share, reload.

use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Europe::Berlin;
use url::Url;

use sharecal_core::constants::{DEFAULT_DURATION_MINUTES, DEFAULT_TITLE};
use sharecal_core::form::EventForm;
use sharecal_core::grid::{build_month_grid, events_for_day};
use sharecal_core::ics::{export_calendar_document, parse_calendar_document};
use sharecal_core::share::make_share_link;
use sharecal_core::storage::{FileStore, MemoryStore};
use sharecal_core::store::{Action, Store};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn create<S, Tz>(store: &mut Store<S, Tz>, form: EventForm)
where
    S: sharecal_core::storage::KeyValueStore,
    Tz: TimeZone,
{
    let date = NaiveDate::parse_from_str(&form.date, "%Y-%m-%d").unwrap();
    store.dispatch(Action::OpenCreate(date)).unwrap();
    store.dispatch(Action::EditForm(form)).unwrap();
    store.dispatch(Action::Save).unwrap();
}

fn form(title: &str, date: &str, time: &str, duration: &str) -> EventForm {
    EventForm {
        title: title.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        duration: duration.to_string(),
        ..Default::default()
    }
}

#[test]
fn events_survive_reopening_the_file_store() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut store = Store::open(FileStore::new(dir.path()), None, Berlin, day(2024, 3, 1)).unwrap();
        create(&mut store, form("Sync", "2024-03-15", "09:00", "30"));
        create(&mut store, form("", "2024-03-15", "08:00", "soon"));
    }

    let store = Store::open(FileStore::new(dir.path()), None, Berlin, day(2024, 3, 1)).unwrap();
    assert_eq!(store.events().len(), 2);

    let todays = events_for_day(day(2024, 3, 15), store.events(), &Berlin);
    let titles: Vec<&str> = todays.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec![DEFAULT_TITLE, "Sync"]);
    assert_eq!(todays[0].duration, DEFAULT_DURATION_MINUTES);
}

#[test]
fn edit_and_delete_through_the_store() {
    let mut store = Store::open(MemoryStore::new(), None, Utc, day(2024, 3, 1)).unwrap();
    create(&mut store, form("Sync", "2024-03-15", "09:00", "30"));
    create(&mut store, form("Lunch", "2024-03-15", "12:00", "60"));

    let sync_id = store.events()[0].id.clone();
    store.dispatch(Action::OpenEdit(sync_id.clone())).unwrap();
    store
        .dispatch(Action::EditForm(form("Sync (moved)", "2024-03-16", "10:00", "45")))
        .unwrap();
    store.dispatch(Action::Save).unwrap();

    assert_eq!(store.events().len(), 2);
    let moved = &store.events()[0];
    assert_eq!(moved.id, sync_id);
    assert_eq!(moved.title, "Sync (moved)");
    assert_eq!(moved.start, Utc.with_ymd_and_hms(2024, 3, 16, 10, 0, 0).unwrap());
    assert_eq!(moved.duration, 45);

    assert!(!store.request_delete("no-such-id", &|_: &str| true).unwrap());
    assert!(store.request_delete(&sync_id, &|_: &str| true).unwrap());
    assert_eq!(store.events().len(), 1);
    assert_eq!(store.events()[0].title, "Lunch");
}

#[test]
fn shared_link_bootstraps_a_fresh_store() {
    let mut alice = Store::open(MemoryStore::new(), None, Utc, day(2024, 3, 1)).unwrap();
    create(&mut alice, form("Sync", "2024-03-15", "09:00", "30"));

    let base = Url::parse("https://cal.example.org/").unwrap();
    let link = make_share_link(&base, alice.events()).unwrap();

    let bob = Store::open(MemoryStore::new(), Some(&link), Utc, day(2024, 3, 1)).unwrap();
    assert_eq!(bob.events(), alice.events());
}

#[test]
fn month_view_and_export_agree() {
    let mut store = Store::open(MemoryStore::new(), None, Utc, day(2024, 3, 1)).unwrap();
    create(&mut store, form("Sync", "2024-03-15", "09:00", "30"));

    let grid = build_month_grid(store.state().reference);
    let with_events: Vec<NaiveDate> = grid
        .days
        .iter()
        .copied()
        .filter(|d| !events_for_day(*d, store.events(), &Utc).is_empty())
        .collect();
    assert_eq!(with_events, vec![day(2024, 3, 15)]);

    let ics = export_calendar_document(store.events(), Utc::now());
    assert!(ics.contains("DTSTART:20240315T090000Z\r\n"));
    assert!(ics.contains("DTEND:20240315T093000Z\r\n"));

    let mut other = Store::open(MemoryStore::new(), None, Utc, day(2024, 3, 1)).unwrap();
    let added = other.import(parse_calendar_document(&ics, &Utc).unwrap()).unwrap();
    assert_eq!(added, 1);
    assert_eq!(other.events(), store.events());
}
