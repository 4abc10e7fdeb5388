mod common;

use chatbuf::buffer::{Buffer, BufferId, CallbackStatus, PluginId};
use chatbuf::error::BufferError;
use chatbuf::signal::{NotificationSink, Signal, SignalLog};
use common::{assert_numbering, directory_with, names, numbered_directory, numbers};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_close_middle_buffer_switches_window_to_previous() {
    let (mut dir, ids) = directory_with(&[
        (None, "weechat"),
        (Some("irc"), "freenode"),
        (Some("irc"), "freenode.#chan"),
    ]);
    let (a, b, c) = (ids[0], ids[1], ids[2]);
    assert_eq!(numbers(&dir), vec![1, 2, 3]);

    let window = dir.windows().current_id();
    assert!(dir.switch_by_number(window, 2));
    assert_eq!(dir.current_buffer(), Some(b));

    dir.close(b, true).expect("close");
    assert_eq!(names(&dir), vec!["weechat", "freenode.#chan"]);
    assert_numbering(&dir);
    assert_eq!(dir.current_buffer(), Some(a));
    assert_eq!(dir.get(c).map(Buffer::number), Some(2));
}

#[test]
fn test_close_head_buffer_wraps_to_tail() {
    let (mut dir, ids) = directory_with(&[
        (None, "weechat"),
        (Some("irc"), "freenode"),
        (Some("irc"), "freenode.#chan"),
    ]);
    // first window shows the head buffer
    dir.close(ids[0], true).expect("close");
    assert_eq!(dir.current_buffer(), Some(ids[2]));
    assert_eq!(dir.get(ids[2]).map(Buffer::num_displayed), Some(1));
    assert_numbering(&dir);
}

#[test]
fn test_close_last_buffer_leaves_window_empty() {
    let (mut dir, ids) = directory_with(&[(None, "weechat")]);
    dir.close(ids[0], true).expect("close");
    assert!(dir.is_empty());
    assert_eq!(dir.current_buffer(), None);

    // the next buffer is attached to the empty window again
    let id = dir.create(None, "weechat", None, None).expect("recreate");
    assert_eq!(dir.current_buffer(), Some(id));
    assert_ne!(id, ids[0]);
}

#[test]
fn test_renumber_on_close() {
    let (mut dir, ids) = numbered_directory(5);
    dir.close(ids[1], false).expect("close");
    assert_eq!(names(&dir), vec!["b1", "b3", "b4", "b5"]);
    assert_numbering(&dir);
}

#[test]
fn test_duplicate_name_leaves_registry_unchanged() {
    let (mut dir, _) = directory_with(&[(None, "weechat"), (Some("irc"), "freenode")]);
    let err = dir
        .create(Some(PluginId::new("irc")), "freenode", None, None)
        .unwrap_err();
    assert_eq!(
        err,
        BufferError::DuplicateName {
            owner: "irc".to_string(),
            name: "freenode".to_string()
        }
    );
    assert_eq!(dir.len(), 2);
    assert_eq!(numbers(&dir), vec![1, 2]);

    // "core" names the plugin-less owner
    assert!(dir.create(None, "weechat", None, None).is_err());
}

#[test]
fn test_signals_follow_lifecycle_order() {
    let log = SignalLog::shared();
    let (mut dir, _) = directory_with(&[]);
    dir.subscribe(Rc::clone(&log));

    let id = dir
        .create(Some(PluginId::new("irc")), "freenode", None, None)
        .expect("create");
    dir.rename(id, "libera").expect("rename");
    dir.retitle(id, "Welcome").expect("retitle");
    dir.close(id, true).expect("close");

    let log = log.borrow();
    assert_eq!(
        log.names(),
        vec![
            "buffer_open",
            "buffer_renamed",
            "buffer_title_changed",
            "buffer_closing",
            "buffer_closed",
        ]
    );
    assert_eq!(log.events[0].1, Some(id));
    assert_eq!(log.events[2].1, None);
    assert_eq!(log.events[4].1, Some(id));
}

/// Records what a sink can still read at each stage of a close.
#[derive(Default)]
struct CloseProbe {
    seen: Vec<(String, String, bool)>,
}

impl NotificationSink for CloseProbe {
    fn on_signal(&mut self, signal: &Signal<'_>) {
        if let Signal::BufferClosing(buffer) | Signal::BufferClosed(buffer) = signal {
            self.seen.push((
                signal.name().to_string(),
                buffer.name().to_string(),
                buffer.lines().is_empty(),
            ));
        }
    }
}

#[test]
fn test_closing_signal_sees_complete_buffer() {
    let probe = Rc::new(RefCell::new(CloseProbe::default()));
    let (mut dir, ids) = directory_with(&[(None, "weechat")]);
    dir.subscribe(Rc::clone(&probe));
    dir.print_line(ids[0], chatbuf::buffer::Line::new(None, "hello"))
        .expect("print");
    dir.close(ids[0], false).expect("close");

    let probe = probe.borrow();
    assert_eq!(
        probe.seen,
        vec![
            ("buffer_closing".to_string(), "weechat".to_string(), false),
            ("buffer_closed".to_string(), String::new(), true),
        ]
    );
}

#[test]
fn test_close_callback_status_never_vetoes() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&calls);
    let (mut dir, _) = directory_with(&[(None, "weechat")]);
    let id = dir
        .create(
            Some(PluginId::new("irc")),
            "freenode",
            None,
            Some(Box::new(move |buffer: &Buffer| {
                seen.borrow_mut().push(buffer.full_name());
                CallbackStatus::Error
            })),
        )
        .expect("create");

    dir.close(id, true).expect("close");
    assert_eq!(*calls.borrow(), vec!["irc.freenode".to_string()]);
    assert!(!dir.is_valid(id));
    assert_eq!(dir.close(id, true), Err(BufferError::NotFound(id)));
}

#[test]
fn test_close_purges_trackers() {
    let (mut dir, ids) = numbered_directory(3);
    dir.display(ids[1]).expect("display");
    assert_eq!(dir.previous_buffer(), Some(ids[0]));
    dir.set(Some(ids[0]), "hotlist", "3");
    dir.set_hotlist_initial_buffer(Some(ids[0]));

    dir.close(ids[0], true).expect("close");
    assert_eq!(dir.previous_buffer(), None);
    assert!(dir.hotlist().is_empty());
    assert_eq!(dir.hotlist().initial_buffer(), None);
}

#[test]
fn test_windows_showing_closed_buffer_switch_together() {
    let (mut dir, ids) = numbered_directory(3);
    let second = dir.add_window(Some(ids[2]));
    dir.display(ids[2]).expect("display");
    assert_eq!(dir.get(ids[2]).map(Buffer::num_displayed), Some(2));

    dir.close(ids[2], true).expect("close");
    assert_eq!(dir.current_buffer(), Some(ids[1]));
    assert_eq!(
        dir.windows().get(second).and_then(|w| w.buffer()),
        Some(ids[1])
    );
    assert_eq!(dir.get(ids[1]).map(Buffer::num_displayed), Some(2));
}

#[test]
fn test_close_all_empties_directory() {
    let (mut dir, _) = numbered_directory(4);
    dir.close_all();
    assert!(dir.is_empty());
    assert_eq!(dir.current_buffer(), None);
}

#[test]
fn test_unknown_buffer_is_reported() {
    let (mut dir, _) = numbered_directory(1);
    let ghost = BufferId(42);
    assert_eq!(dir.rename(ghost, "x"), Err(BufferError::NotFound(ghost)));
    assert_eq!(dir.clear(ghost), Err(BufferError::NotFound(ghost)));
    assert!(!dir.is_valid(ghost));
}

#[test]
fn test_refresh_escalation() {
    let (mut dir, ids) = numbered_directory(1);
    dir.take_refresh(ids[0]);
    dir.ask_chat_refresh(ids[0], 1);
    dir.ask_chat_refresh(ids[0], 2);
    dir.ask_chat_refresh(ids[0], 1);
    dir.ask_title_refresh(ids[0], 1);
    let pending = dir.take_refresh(ids[0]).expect("refresh");
    assert_eq!(pending.chat, 2);
    assert_eq!(pending.title, 1);
    assert_eq!(pending.nicklist, 0);
}

#[test]
fn test_clear_all_keeps_numbering_and_names() {
    let (mut dir, ids) = numbered_directory(3);
    for id in &ids {
        dir.print_line(*id, chatbuf::buffer::Line::new(None, "line"))
            .expect("print");
    }
    dir.clear_all();
    assert!(dir.registry().iter().all(|b| b.lines().is_empty()));
    assert_eq!(names(&dir), vec!["b1", "b2", "b3"]);
    assert_numbering(&dir);
}
