mod common;

use chatbuf::buffer::PluginId;
use chatbuf::directory::BufferDirectory;
use chatbuf::mirror::ObjectMirror;
use std::rc::Rc;

fn mirrored() -> (BufferDirectory, Rc<std::cell::RefCell<ObjectMirror>>) {
    let mut dir = BufferDirectory::default();
    let mirror = ObjectMirror::shared();
    dir.subscribe(Rc::clone(&mirror));
    (dir, mirror)
}

#[test]
fn test_open_publishes_sanitized_path() {
    let (mut dir, mirror) = mirrored();
    let core = dir.create(None, "weechat", None, None).expect("create");
    let chan = dir
        .create(Some(PluginId::new("irc")), "freenode.#rust", None, None)
        .expect("create");

    let mirror = mirror.borrow();
    assert_eq!(mirror.path_of(core), Some("/org/weechat/buffer/core/weechat"));
    assert_eq!(
        mirror.lookup("/org/weechat/buffer/irc/freenode__rust"),
        Some(chan)
    );
    assert_eq!(mirror.len(), 2);
}

#[test]
fn test_rename_moves_path() {
    let (mut dir, mirror) = mirrored();
    let id = dir
        .create(Some(PluginId::new("irc")), "freenode", None, None)
        .expect("create");
    dir.rename(id, "libera").expect("rename");

    let mirror = mirror.borrow();
    assert_eq!(mirror.lookup("/org/weechat/buffer/irc/freenode"), None);
    assert_eq!(mirror.path_of(id), Some("/org/weechat/buffer/irc/libera"));
    assert_eq!(mirror.len(), 1);
}

#[test]
fn test_close_withdraws_path() {
    let (mut dir, mirror) = mirrored();
    let a = dir.create(None, "a", None, None).expect("create");
    let b = dir.create(None, "b", None, None).expect("create");
    dir.close(a, true).expect("close");

    let mirror = mirror.borrow();
    assert_eq!(mirror.path_of(a), None);
    let paths: Vec<_> = mirror.paths().collect();
    assert_eq!(paths, vec!["/org/weechat/buffer/core/b"]);
    assert_eq!(mirror.lookup(paths[0]), Some(b));
}

#[test]
fn test_colliding_names_get_distinct_paths() {
    let (mut dir, mirror) = mirrored();
    let dotted = dir
        .create(Some(PluginId::new("irc")), "a.b", None, None)
        .expect("create");
    let hashed = dir
        .create(Some(PluginId::new("irc")), "a#b", None, None)
        .expect("create");
    {
        let mirror = mirror.borrow();
        assert_eq!(mirror.path_of(dotted), Some("/org/weechat/buffer/irc/a_b"));
        assert_eq!(mirror.path_of(hashed), Some("/org/weechat/buffer/irc/a_b_2"));
        assert_eq!(mirror.len(), 2);
    }

    dir.close(hashed, true).expect("close");
    let mirror = mirror.borrow();
    assert_eq!(mirror.path_of(dotted), Some("/org/weechat/buffer/irc/a_b"));
    assert_eq!(mirror.lookup("/org/weechat/buffer/irc/a_b"), Some(dotted));
    assert_eq!(mirror.len(), 1);
}
