//! Integration tests for the playback controller
//!
//! Drives the controller through a recording device and feeds device
//! events back in by hand, the way a host event loop would.

mod common;

use common::{playlist, track, url, Harness};
use encore_core::Track;
use encore_playback::{DeviceEvent, PlaybackConfig, PlaybackEvent, PlaybackState};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

// ===== Navigation scenarios =====

#[test]
fn play_next_previous_wrap_through_playlist() {
    let mut h = Harness::new();
    let tracks = playlist(&["1", "2", "3"]);
    h.controller.set_playlist(tracks.clone());

    h.controller.play(tracks[1].clone());
    assert_eq!(h.controller.playlist_index(), 1);
    assert_eq!(h.last_url(), Some(url("2")));

    h.controller.next();
    assert_eq!(h.controller.current_track().unwrap().id.as_str(), "3");
    assert_eq!(h.controller.playlist_index(), 2);

    h.controller.next();
    assert_eq!(h.controller.current_track().unwrap().id.as_str(), "1");
    assert_eq!(h.controller.playlist_index(), 0);

    h.controller.previous();
    assert_eq!(h.controller.current_track().unwrap().id.as_str(), "3");
    assert_eq!(h.controller.playlist_index(), 2);
    assert_eq!(h.load_count(), 4);
    assert!(h.controller.is_playing());
}

#[test]
fn navigation_on_empty_playlist_is_noop() {
    let mut h = Harness::new();
    h.controller.play(track("solo"));

    h.controller.next();
    h.controller.previous();

    assert_eq!(h.controller.current_track().unwrap().id.as_str(), "solo");
    assert_eq!(h.load_count(), 1);
}

#[test]
fn playing_a_track_outside_the_playlist_keeps_the_index() {
    let mut h = Harness::new();
    let tracks = playlist(&["a", "b", "c"]);
    h.controller.set_playlist(tracks.clone());
    h.controller.play(tracks[2].clone());

    h.controller.play(track("outsider"));
    assert_eq!(h.controller.playlist_index(), 2);

    // Navigation continues from the stale slot
    h.controller.next();
    assert_eq!(h.controller.current_track().unwrap().id.as_str(), "a");
}

#[test]
fn single_track_playlist_loops_once_per_finish() {
    let mut h = Harness::new();
    let tracks = playlist(&["only"]);
    h.controller.set_playlist(tracks.clone());
    h.controller.play(tracks[0].clone());
    assert_eq!(h.load_count(), 1);

    let load = h.controller.current_load();
    h.controller.handle_device_event(DeviceEvent::finished(load));
    assert_eq!(h.load_count(), 2);
    assert_eq!(h.controller.current_track().unwrap().id.as_str(), "only");
    assert!(h.controller.is_playing());

    h.controller.next();
    assert_eq!(h.load_count(), 3);
    h.controller.previous();
    assert_eq!(h.load_count(), 4);
}

#[test]
fn set_playlist_rederives_index_for_current_track() {
    let mut h = Harness::new();
    let tracks = playlist(&["a", "b", "c"]);
    h.controller.set_playlist(tracks.clone());
    h.controller.play(tracks[2].clone());

    h.controller.set_playlist(vec![tracks[2].clone(), tracks[0].clone()]);
    assert_eq!(h.controller.playlist_index(), 0);
    assert!(h.controller.is_playing());
    assert_eq!(h.load_count(), 1);

    h.controller.next();
    assert_eq!(h.controller.current_track().unwrap().id.as_str(), "a");
}

#[test]
fn set_playlist_does_not_touch_transport() {
    let mut h = Harness::new();
    h.controller.play(track("x"));
    h.controller.pause();

    h.controller.set_playlist(Vec::new());
    assert_eq!(h.controller.playback_state(), PlaybackState::Paused);
    assert_eq!(h.controller.current_track().unwrap().id.as_str(), "x");
}

// ===== Device events =====

#[test]
fn duration_stays_stale_until_device_reports() {
    let mut h = Harness::new();
    h.controller.play(track("a"));
    assert_eq!(h.controller.duration(), 0.0);

    let first = h.controller.current_load();
    h.controller
        .handle_device_event(DeviceEvent::duration_known(first, 200.0));
    assert_eq!(h.controller.duration(), 200.0);

    h.controller.play(track("b"));
    assert_eq!(h.controller.duration(), 200.0);

    // A late report for the superseded load changes nothing
    h.controller
        .handle_device_event(DeviceEvent::duration_known(first, 999.0));
    assert_eq!(h.controller.duration(), 200.0);

    let second = h.controller.current_load();
    h.controller
        .handle_device_event(DeviceEvent::duration_known(second, 93.5));
    assert_eq!(h.controller.duration(), 93.5);
}

#[test]
fn infinite_duration_is_ignored() {
    let mut h = Harness::new();
    h.controller.play(track("stream"));
    let load = h.controller.current_load();

    h.controller
        .handle_device_event(DeviceEvent::duration_known(load, f64::INFINITY));
    assert_eq!(h.controller.duration(), 0.0);
}

#[test]
fn finished_auto_advances_and_position_follows_new_load() {
    let mut h = Harness::new();
    let tracks = playlist(&["a", "b"]);
    h.controller.set_playlist(tracks.clone());
    h.controller.play(tracks[0].clone());

    let first = h.controller.current_load();
    h.controller
        .handle_device_event(DeviceEvent::time_update(first, 181.0));
    h.controller.handle_device_event(DeviceEvent::finished(first));

    assert_eq!(h.controller.current_track().unwrap().id.as_str(), "b");
    assert!(h.controller.is_playing());
    assert_eq!(h.last_url(), Some(url("b")));

    // Late tick from the finished track is discarded
    h.controller
        .handle_device_event(DeviceEvent::time_update(first, 182.0));
    assert_eq!(h.controller.position(), 181.0);

    let second = h.controller.current_load();
    h.controller
        .handle_device_event(DeviceEvent::time_update(second, 0.0));
    assert_eq!(h.controller.position(), 0.0);
}

#[test]
fn stale_finished_never_double_advances() {
    let mut h = Harness::new();
    let tracks = playlist(&["a", "b", "c"]);
    h.controller.set_playlist(tracks.clone());
    h.controller.play(tracks[0].clone());
    let first = h.controller.current_load();

    h.controller.play(tracks[1].clone());
    h.controller.handle_device_event(DeviceEvent::finished(first));

    assert_eq!(h.controller.current_track().unwrap().id.as_str(), "b");
    assert_eq!(h.load_count(), 2);

    let second = h.controller.current_load();
    h.controller.handle_device_event(DeviceEvent::finished(second));
    h.controller.handle_device_event(DeviceEvent::finished(second));
    assert_eq!(h.controller.current_track().unwrap().id.as_str(), "c");
    assert_eq!(h.load_count(), 3);
}

#[test]
fn finished_with_empty_playlist_stops() {
    let mut h = Harness::new();
    h.controller.play(track("loose"));
    let load = h.controller.current_load();

    h.controller.handle_device_event(DeviceEvent::finished(load));

    assert!(!h.controller.is_playing());
    assert_eq!(h.controller.playback_state(), PlaybackState::Paused);
    assert_eq!(h.load_count(), 1);
}

#[test]
fn events_before_any_load_are_discarded() {
    let mut h = Harness::new();
    h.controller
        .handle_device_event(DeviceEvent::time_update(h.controller.current_load(), 12.0));
    h.controller
        .handle_device_event(DeviceEvent::finished(h.controller.current_load()));

    assert_eq!(h.controller.position(), 0.0);
    assert_eq!(h.controller.playback_state(), PlaybackState::Empty);
}

// ===== Transport =====

#[test]
fn pause_then_resume_keeps_position() {
    let mut h = Harness::new();
    h.controller.play(track("a"));
    let load = h.controller.current_load();
    h.controller
        .handle_device_event(DeviceEvent::time_update(load, 42.5));

    h.controller.pause();
    assert!(!h.controller.is_playing());
    h.controller.pause();
    assert_eq!(h.log.borrow().pauses, 1);

    h.controller.resume();
    assert!(h.controller.is_playing());
    assert_eq!(h.controller.position(), 42.5);
    assert!(h.log.borrow().seeks.is_empty());
}

#[test]
fn seek_clamps_into_known_duration() {
    let mut h = Harness::new();
    h.controller.play(track("a"));
    let load = h.controller.current_load();
    h.controller
        .handle_device_event(DeviceEvent::duration_known(load, 180.0));

    h.controller.seek_to(90.25);
    assert_eq!(h.controller.position(), 90.25);

    h.controller.seek_to(500.0);
    assert_eq!(h.controller.position(), 180.0);

    h.controller.seek_to(-5.0);
    assert_eq!(h.controller.position(), 0.0);

    assert_eq!(h.log.borrow().seeks, vec![90.25, 180.0, 0.0]);
}

#[test]
fn seek_works_while_paused() {
    let mut h = Harness::new();
    h.controller.play(track("a"));
    h.controller.pause();

    h.controller.seek_to(30.0);
    assert_eq!(h.controller.position(), 30.0);
    assert!(!h.controller.is_playing());
}

#[test]
fn seek_before_duration_is_known_only_clamps_below() {
    let mut h = Harness::new();
    h.controller.play(track("a"));
    let load = h.controller.current_load();
    h.controller
        .handle_device_event(DeviceEvent::duration_known(load, 60.0));

    // New load: the old duration must not bound the new track
    h.controller.play(track("b"));
    h.controller.seek_to(120.0);
    assert_eq!(h.controller.position(), 120.0);
}

#[test]
fn seek_to_fraction_uses_confirmed_duration() {
    let mut h = Harness::new();
    h.controller.play(track("a"));
    h.controller.seek_to_fraction(0.5);
    assert_eq!(h.controller.position(), 0.0);

    let load = h.controller.current_load();
    h.controller
        .handle_device_event(DeviceEvent::duration_known(load, 200.0));
    h.controller.seek_to_fraction(0.25);
    assert_eq!(h.controller.position(), 50.0);
    assert_eq!(h.controller.state().progress(), 0.25);

    h.controller.seek_to_fraction(3.0);
    assert_eq!(h.controller.position(), 200.0);
}

#[test]
fn seek_without_clamping_passes_through() {
    let config = PlaybackConfig {
        clamp_seek: false,
        ..PlaybackConfig::default()
    };
    let mut h = Harness::with_config(config);
    h.controller.play(track("a"));
    let load = h.controller.current_load();
    h.controller
        .handle_device_event(DeviceEvent::duration_known(load, 10.0));

    h.controller.seek_to(15.0);
    assert_eq!(h.controller.position(), 15.0);
}

// ===== Volume =====

#[test]
fn volume_is_clamped_before_reaching_device() {
    let mut h = Harness::new();
    h.controller.play(track("a"));

    h.controller.set_volume(0.5);
    assert_eq!(h.device_volume(), 0.5);

    h.controller.set_volume(1.2);
    assert_eq!(h.controller.volume(), 1.0);
    assert_eq!(h.device_volume(), 1.0);

    h.controller.set_volume(-3.0);
    assert_eq!(h.controller.volume(), 0.0);
    assert_eq!(h.device_volume(), 0.0);
}

#[test]
fn initial_volume_reaches_lazily_built_device() {
    let config = PlaybackConfig {
        initial_volume: 0.4,
        ..PlaybackConfig::default()
    };
    let mut h = Harness::with_config(config);
    h.controller.play(track("a"));
    assert_eq!(h.device_volume(), 0.4);
}

// ===== Failures =====

#[test]
fn synchronous_rejection_is_reported_not_raised() {
    let mut h = Harness::new();
    let broken = Track::new("broken", "Broken", "Artist", "bad://nowhere");
    h.controller.play(broken);

    assert_eq!(h.controller.playback_state(), PlaybackState::Paused);
    let fault = h.controller.fault().unwrap();
    assert_eq!(fault.track_id.as_str(), "broken");
    assert!(fault.message.contains("bad://nowhere"));
    assert_eq!(h.load_count(), 0);

    h.controller.play(track("good"));
    assert!(h.controller.fault().is_none());
    assert!(h.controller.is_playing());
}

#[test]
fn asynchronous_failure_stops_playback_with_fault() {
    let mut h = Harness::new();
    h.controller.play(track("a"));
    h.controller.drain_events();

    let load = h.controller.current_load();
    h.controller
        .handle_device_event(DeviceEvent::failed(load, "MEDIA_ERR_SRC_NOT_SUPPORTED"));

    assert!(!h.controller.is_playing());
    assert_eq!(h.controller.current_track().unwrap().id.as_str(), "a");
    assert_eq!(h.controller.fault().unwrap().load, load);

    let events = h.controller.drain_events();
    assert_eq!(
        events,
        vec![
            PlaybackEvent::LoadFailed {
                track_id: "a".into(),
                load,
                message: "MEDIA_ERR_SRC_NOT_SUPPORTED".into(),
            },
            PlaybackEvent::StateChanged {
                state: PlaybackState::Paused,
            },
        ]
    );
}

#[test]
fn repeated_failure_for_one_load_is_reported_once() {
    let mut h = Harness::new();
    h.controller.play(track("a"));
    h.controller.drain_events();

    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    h.controller.subscribe(move |_| seen.set(seen.get() + 1));

    // The element error and the rejected play() promise arrive separately
    let load = h.controller.current_load();
    h.controller
        .handle_device_event(DeviceEvent::failed(load, "media error code 4"));
    h.controller
        .handle_device_event(DeviceEvent::failed(load, "NotSupportedError"));

    assert_eq!(calls.get(), 1);
    assert_eq!(h.controller.fault().unwrap().message, "media error code 4");

    let failures = h
        .controller
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, PlaybackEvent::LoadFailed { .. }))
        .count();
    assert_eq!(failures, 1);
}

#[test]
fn resume_after_failure_clears_fault() {
    let mut h = Harness::new();
    h.controller.play(track("a"));
    let load = h.controller.current_load();
    h.controller
        .handle_device_event(DeviceEvent::failed(load, "network"));
    assert!(h.controller.fault().is_some());

    h.controller.resume();

    assert!(h.controller.is_playing());
    assert!(h.controller.fault().is_none());
    assert_eq!(h.controller.state().fault(), None);
}

#[test]
fn failure_from_superseded_load_is_ignored() {
    let mut h = Harness::new();
    h.controller.play(track("a"));
    let first = h.controller.current_load();
    h.controller.play(track("b"));

    h.controller
        .handle_device_event(DeviceEvent::failed(first, "network"));
    assert!(h.controller.fault().is_none());
    assert!(h.controller.is_playing());
}

// ===== Observers & events =====

#[test]
fn observers_are_notified_once_per_change() {
    let mut h = Harness::new();
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    h.controller.subscribe(move |_| seen.set(seen.get() + 1));

    let tracks = playlist(&["a", "b"]);
    h.controller.set_playlist(tracks.clone());
    assert_eq!(calls.get(), 1);

    h.controller.play(tracks[0].clone());
    assert_eq!(calls.get(), 2);

    let load = h.controller.current_load();
    h.controller
        .handle_device_event(DeviceEvent::time_update(load, 1.0));
    h.controller
        .handle_device_event(DeviceEvent::time_update(load, 1.0));
    assert_eq!(calls.get(), 3);

    h.controller.pause();
    h.controller.pause();
    assert_eq!(calls.get(), 4);

    h.controller.handle_device_event(DeviceEvent::finished(load));
    assert_eq!(calls.get(), 5);
}

#[test]
fn observer_sees_the_whole_update_at_once() {
    let mut h = Harness::new();
    let tracks = playlist(&["a", "b"]);
    h.controller.set_playlist(tracks.clone());
    h.controller.play(tracks[0].clone());

    let snapshots = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&snapshots);
    let id = h.controller.subscribe(move |state| {
        let current = state.current_track().map(|t| t.id.to_string());
        sink.borrow_mut()
            .push((current, state.playlist_index(), state.is_playing()));
    });

    let load = h.controller.current_load();
    h.controller.handle_device_event(DeviceEvent::finished(load));
    assert_eq!(
        *snapshots.borrow(),
        vec![(Some("b".to_string()), 1, true)]
    );

    assert!(h.controller.unsubscribe(id));
    h.controller.next();
    assert_eq!(snapshots.borrow().len(), 1);
}

#[test]
fn play_queues_track_and_state_events() {
    let mut h = Harness::new();
    h.controller.play(track("a"));
    h.controller.play(track("b"));

    let events = h.controller.drain_events();
    assert_eq!(
        events,
        vec![
            PlaybackEvent::TrackChanged {
                track_id: "a".into(),
                previous_track_id: None,
            },
            PlaybackEvent::StateChanged {
                state: PlaybackState::Playing,
            },
            PlaybackEvent::TrackChanged {
                track_id: "b".into(),
                previous_track_id: Some("a".into()),
            },
        ]
    );
    assert!(!h.controller.has_pending_events());
}

#[test]
fn full_event_buffer_drops_oldest() {
    let config = PlaybackConfig {
        event_buffer: 2,
        ..PlaybackConfig::default()
    };
    let mut h = Harness::with_config(config);
    h.controller.set_volume(0.1);
    h.controller.set_volume(0.2);
    h.controller.set_volume(0.3);

    let events = h.controller.drain_events();
    assert_eq!(
        events,
        vec![
            PlaybackEvent::VolumeChanged {
                level: 0.2,
                is_muted: false,
            },
            PlaybackEvent::VolumeChanged {
                level: 0.3,
                is_muted: false,
            },
        ]
    );
}

#[test]
fn device_is_built_once_and_only_on_play() {
    let mut h = Harness::new();
    h.controller.set_playlist(playlist(&["a", "b"]));
    h.controller.set_volume(0.7);
    assert_eq!(h.builds.get(), 0);

    h.controller.next();
    h.controller.next();
    h.controller.play(track("c"));

    assert_eq!(h.builds.get(), 1);
    assert_eq!(h.load_count(), 3);
}
