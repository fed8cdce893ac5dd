use anyhow::Result;
use clap::Parser;
use session_core::{Demo, DemoSession, MemoryDemo};
use shared::domain::{DemoEvent, DemoHeader, EventEntry, EventId};

#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "sample_match")]
    demo_name: String,
}

fn print_entries(session: &DemoSession<MemoryDemo>) {
    for entry in session.entries() {
        println!(
            "  id={} tick={} {}: {}",
            entry.id.0, entry.event.tick, entry.event.name, entry.event.value
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let header = DemoHeader {
        map_name: "cp_process_final".into(),
        server_name: "local server".into(),
        client_name: "player".into(),
        playback_ticks: 79_200,
        playback_seconds: 1188.0,
    };
    let demo = MemoryDemo::new(
        args.demo_name,
        header,
        vec![DemoEvent {
            tick: 12_400,
            name: "Bookmark".into(),
            value: "nice airshot".into(),
        }],
    );

    let mut session = DemoSession::new();
    session.view_demo(demo);
    println!(
        "Opened '{}' on {}",
        session.demo_name().unwrap_or_default(),
        session.header().map(|h| h.map_name.clone()).unwrap_or_default()
    );
    print_entries(&session);

    session.add_event();
    let id = session
        .add_callback(DemoEvent {
            tick: 45_100,
            name: "Killstreak".into(),
            value: "5".into(),
        })?
        .expect("add dialog was open");
    println!("Added event id={}", id.0);

    session.edit_event(session.entries()[0].clone());
    session.edit_callback(EventEntry::new(
        EventId(0),
        DemoEvent {
            tick: 12_400,
            name: "Bookmark".into(),
            value: "nice airshot (clipped)".into(),
        },
    ))?;

    println!("Event table after editing:");
    print_entries(&session);

    if let Some(entry) = session.entries().first() {
        println!("First entry as JSON: {}", serde_json::to_string(entry)?);
    }

    let demo = session.close().expect("session was open");
    println!(
        "Closed '{}'; {} events persisted in the demo",
        demo.short_name(),
        demo.events().len()
    );

    Ok(())
}
