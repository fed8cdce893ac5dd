use session_core::{Demo, DemoSession, MemoryDemo, SessionState};
use shared::domain::{DemoEvent, DemoHeader, EventEntry, EventId};

fn bookmark(tick: i64, value: &str) -> DemoEvent {
    DemoEvent {
        tick,
        name: "Bookmark".to_string(),
        value: value.to_string(),
    }
}

fn demo(name: &str, events: Vec<DemoEvent>) -> MemoryDemo {
    let header = DemoHeader {
        map_name: "pl_upward".to_string(),
        server_name: "local server".to_string(),
        client_name: "player".to_string(),
        playback_ticks: 120_000,
        playback_seconds: 1800.0,
    };
    MemoryDemo::new(name, header, events)
}

#[test]
fn full_editing_session_acceptance() {
    let mut session = DemoSession::new();

    // Load a demo with a single bookmark at tick 10.
    session.view_demo(demo("match_one", vec![bookmark(10, "A")]));
    assert_eq!(session.state(), SessionState::Viewing);
    assert_eq!(session.entries().len(), 1);
    assert_eq!(session.entries()[0].id, EventId(0));
    assert_eq!(session.entries()[0].event, bookmark(10, "A"));

    // Add a second bookmark through the dialog; it gets the next id.
    session.add_event();
    let added = session
        .add_callback(bookmark(20, "B"))
        .expect("add persists")
        .expect("add dialog was open");
    assert_eq!(added, EventId(1));
    assert_eq!(session.entries().len(), 2);

    // Edit the first bookmark's payload; ids and order are untouched.
    let first = session.entries()[0].clone();
    session.edit_event(first);
    session
        .edit_callback(EventEntry::new(EventId(0), bookmark(10, "A2")))
        .expect("edit persists");
    assert_eq!(session.entries()[0].event.value, "A2");
    assert_eq!(session.entries()[1].event.value, "B");

    // Delete the first bookmark from its edit dialog.
    let first = session.entries()[0].clone();
    session.edit_event(first);
    session.delete_callback(EventId(0)).expect("delete persists");
    assert_eq!(session.entries().len(), 1);
    assert_eq!(session.entries()[0].id, EventId(1));

    // A later add does not reuse the deleted id 0.
    session.add_event();
    let added = session
        .add_callback(bookmark(30, "C"))
        .expect("add persists")
        .expect("add dialog was open");
    assert_eq!(added, EventId(2));

    // Every mutation was written through; the demo file already matches.
    let events = session.demo().expect("open").events();
    assert_eq!(events, vec![bookmark(20, "B"), bookmark(30, "C")]);

    // Opening another demo leaves no residue from the first session.
    session.view_demo(demo("match_two", vec![bookmark(5, "Y1"), bookmark(6, "Y2")]));
    assert_eq!(session.entries().len(), 2);
    assert_eq!(session.entries()[0].id, EventId(0));
    assert_eq!(session.entries()[1].id, EventId(1));
    assert!(session.entries().iter().all(|e| e.event.value.starts_with('Y')));

    // Deleting the demo tears the whole session down.
    session.delete_dialog_open();
    session.delete_dialog_confirm().expect("delete demo");
    assert_eq!(session.state(), SessionState::Closed);
    assert!(session.demo().is_none());
    assert!(session.entries().is_empty());
}
