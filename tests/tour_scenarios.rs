//! End-to-end tour walkthroughs against in-memory and file-backed storage.

use onboardx::analytics::{CallbackSink, ChannelSink, EventType, MemorySink, SinkError};
use onboardx::core::TourMode;
use onboardx::effects::TourAction;
use onboardx::presets;
use onboardx::progress::{FileStorage, MemoryStorage, ProgressRecord};
use onboardx::{TourConfig, TourMachine};

const KEY: &str = "onboardx_tour_state";

fn welcome(storage: &MemoryStorage, sink: &MemorySink) -> TourMachine {
    presets::welcome_tour()
        .storage(storage.clone())
        .sink(sink.clone())
        .log_events(false)
        .build()
        .unwrap()
}

fn written(storage: &MemoryStorage) -> Vec<ProgressRecord> {
    storage
        .writes_for(KEY)
        .iter()
        .map(|raw| serde_json::from_str(raw).unwrap())
        .collect()
}

fn persisted(storage: &MemoryStorage) -> Option<ProgressRecord> {
    storage
        .item(KEY)
        .map(|raw| serde_json::from_str(&raw).unwrap())
}

#[test]
fn full_walkthrough_completes_once() {
    let storage = MemoryStorage::new();
    let sink = MemorySink::new();
    let mut tour = welcome(&storage, &sink);

    tour.open_launcher();
    tour.start();
    for _ in 0..4 {
        assert!(tour.next().is_applied());
    }
    assert_eq!(tour.mode(), TourMode::Active(4));
    assert_eq!(persisted(&storage), Some(ProgressRecord::at(4)));

    assert!(tour.next().is_applied());
    assert_eq!(tour.mode(), TourMode::Closed);
    assert!(!tour.has_progress());
    assert_eq!(persisted(&storage), Some(ProgressRecord::finished(4)));

    let completed_writes = written(&storage)
        .iter()
        .filter(|record| record.completed)
        .count();
    assert_eq!(completed_writes, 1);

    let mut expected = vec![(EventType::TourStarted, 0), (EventType::StepStarted, 0)];
    for i in 0..4 {
        expected.push((EventType::StepCompleted, i));
        expected.push((EventType::StepStarted, i + 1));
    }
    expected.push((EventType::StepCompleted, 4));
    expected.push((EventType::TourCompleted, 4));
    assert_eq!(sink.trace(), expected);

    // Further `next` calls are ignored once closed.
    assert!(!tour.next().is_applied());
    assert_eq!(sink.trace().len(), expected.len());
}

#[test]
fn events_carry_tour_identity_and_step_ids() {
    let sink = MemorySink::new();
    let mut tour = presets::welcome_tour()
        .storage(MemoryStorage::new())
        .tour_id("welcome-tour")
        .user_id("user-42")
        .sink(sink.clone())
        .build()
        .unwrap();

    tour.open_launcher();
    tour.start();
    tour.next();

    let events = sink.events();
    assert!(events.iter().all(|e| e.tour_id == "welcome-tour"));
    assert!(events.iter().all(|e| e.user_id == "user-42"));
    assert_eq!(events[0].step_id.as_deref(), Some("welcome"));
    assert_eq!(events[3].step_id.as_deref(), Some("nav"));
}

#[test]
fn dismissing_intro_leaves_no_trace() {
    let storage = MemoryStorage::new();
    let sink = MemorySink::new();
    let mut tour = welcome(&storage, &sink);

    assert!(tour.open_launcher().is_applied());
    assert_eq!(tour.mode(), TourMode::IntroShown);
    assert!(tour.dismiss_intro().is_applied());
    assert_eq!(tour.mode(), TourMode::Closed);

    assert!(storage.writes().is_empty());
    assert!(sink.is_empty());
}

#[test]
fn back_on_first_step_is_a_no_op() {
    let storage = MemoryStorage::new();
    let sink = MemorySink::new();
    let mut tour = welcome(&storage, &sink);
    tour.open_launcher();
    tour.start();

    let writes = storage.writes().len();
    let events = sink.len();

    assert!(!tour.back().is_applied());
    assert_eq!(tour.mode(), TourMode::Active(0));
    assert_eq!(storage.writes().len(), writes);
    assert_eq!(sink.len(), events);
}

#[test]
fn skip_and_close_both_resume_later() {
    for action in [TourAction::Skip, TourAction::Close] {
        let storage = MemoryStorage::new();
        let sink = MemorySink::new();
        let mut tour = welcome(&storage, &sink);
        tour.open_launcher();
        tour.start();
        tour.next();
        tour.next();
        assert!(tour.dispatch(action).is_applied());
        assert_eq!(persisted(&storage), Some(ProgressRecord::at(2)));

        let expected = if action == TourAction::Skip {
            EventType::TourSkipped
        } else {
            EventType::TourClosed
        };
        assert_eq!(sink.trace().last(), Some(&(expected, 2)));

        let reload_sink = MemorySink::new();
        let mut reloaded = welcome(&storage, &reload_sink);
        assert!(reloaded.has_progress());
        reloaded.open_launcher();
        assert_eq!(reloaded.mode(), TourMode::Active(2));
        assert_eq!(
            reload_sink.trace(),
            vec![(EventType::TourResumed, 2), (EventType::StepStarted, 2)]
        );
    }
}

#[test]
fn completed_tour_starts_fresh_on_reload() {
    let storage = MemoryStorage::new();
    let mut tour = welcome(&storage, &MemorySink::new());
    tour.open_launcher();
    tour.start();
    for _ in 0..5 {
        tour.next();
    }

    let mut reloaded = welcome(&storage, &MemorySink::new());
    assert!(!reloaded.has_progress());
    reloaded.open_launcher();
    assert_eq!(reloaded.mode(), TourMode::IntroShown);
}

#[test]
fn invalid_payloads_load_as_no_progress() {
    let payloads = [
        r#"{"currentStep":-1,"completed":false}"#,
        r#"{"currentStep":"x"}"#,
        r#"{"currentStep":2}"#,
        r#"{"completed":false}"#,
        r#"{"currentStep":5,"completed":false}"#,
        "not json at all",
        "",
    ];

    for raw in payloads {
        let storage = MemoryStorage::new().with_item(KEY, raw);
        let mut tour = welcome(&storage, &MemorySink::new());

        assert!(!tour.has_progress(), "payload {raw:?} should be ignored");
        assert_eq!(tour.current_step(), 0);
        tour.open_launcher();
        assert_eq!(tour.mode(), TourMode::IntroShown);
    }
}

#[test]
fn unavailable_storage_degrades_to_non_resumable() {
    let storage = MemoryStorage::new();
    storage.set_failing(true);
    let sink = MemorySink::new();
    let mut tour = welcome(&storage, &sink);

    tour.open_launcher();
    tour.start();
    tour.next();
    tour.close();

    assert_eq!(tour.mode(), TourMode::Closed);
    assert_eq!(sink.len(), 5);

    storage.set_failing(false);
    let reloaded = welcome(&storage, &MemorySink::new());
    assert!(!reloaded.has_progress());
}

#[test]
fn failing_sinks_do_not_interrupt_the_tour() {
    let healthy = MemorySink::new();
    let (channel, receiver) = ChannelSink::bounded(1);
    let mut tour = presets::welcome_tour()
        .storage(MemoryStorage::new())
        .sink(CallbackSink::fallible(|_| {
            Err(SinkError::Rejected("backend offline".into()))
        }))
        .sink(CallbackSink::new(|_| panic!("analytics client bug")))
        .sink(channel)
        .sink(healthy.clone())
        .build()
        .unwrap();

    tour.open_launcher();
    tour.start();
    tour.next();

    assert_eq!(tour.mode(), TourMode::Active(1));
    assert_eq!(healthy.len(), 4);
    // Bounded channel kept the first event and rejected the rest.
    assert_eq!(receiver.try_iter().count(), 1);
}

#[test]
fn seek_jumps_and_persists() {
    let storage = MemoryStorage::new();
    let sink = MemorySink::new();
    let mut tour = welcome(&storage, &sink);
    tour.open_launcher();
    tour.start();

    assert!(tour.seek(3).is_applied());
    assert_eq!(tour.mode(), TourMode::Active(3));
    assert_eq!(persisted(&storage), Some(ProgressRecord::at(3)));

    assert!(!tour.seek(12).is_applied());
    assert_eq!(tour.mode(), TourMode::Active(3));
}

#[test]
fn restart_forgets_progress() {
    let storage = MemoryStorage::new();
    let mut tour = welcome(&storage, &MemorySink::new());
    tour.open_launcher();
    tour.start();
    tour.next();
    tour.close();

    tour.restart();
    assert!(!tour.has_progress());
    assert_eq!(storage.item(KEY), None);

    tour.open_launcher();
    assert_eq!(tour.mode(), TourMode::IntroShown);
}

#[test]
fn view_tracks_the_active_step() {
    let mut tour = welcome(&MemoryStorage::new(), &MemorySink::new());
    tour.open_launcher();
    assert!(tour.view().shows_intro());

    tour.start();
    tour.next();
    tour.next();
    tour.next();
    tour.next();

    let view = tour.view();
    assert_eq!(view.step.id, "finish");
    assert_eq!(view.counter_label(), "Step 5 of 5");
    assert!(view.is_last_step);
    assert!(view.can_go_back);
}

#[test]
fn file_storage_survives_a_new_machine() {
    let dir = tempfile::tempdir().unwrap();
    let config = TourConfig {
        storage_dir: Some(dir.path().to_path_buf()),
        log_events: false,
        ..TourConfig::default()
    };

    let mut tour = presets::welcome_tour()
        .config(config.clone())
        .build()
        .unwrap();
    tour.open_launcher();
    tour.start();
    tour.next();
    tour.next();
    tour.skip();

    let on_disk = FileStorage::new(dir.path()).path_for(KEY);
    assert!(on_disk.exists());

    let mut reloaded = presets::welcome_tour().config(config).build().unwrap();
    reloaded.open_launcher();
    assert_eq!(reloaded.mode(), TourMode::Active(2));
}
