use super::*;
use crate::config::LibrarySettings;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn entry(name: &str) -> PlaylistEntry {
    PlaylistEntry::new(format!("/songs/{name}.mp3"), format!("/songs/{name}.lrc"))
}

fn abc() -> Playlist {
    Playlist::with_entries("abc", vec![entry("a"), entry("b"), entry("c")])
}

fn touch_song(dir: &Path, stem: &str) -> PlaylistEntry {
    let audio = dir.join(format!("{stem}.mp3"));
    let lyrics = dir.join(format!("{stem}.lrc"));
    fs::write(&audio, b"not real").unwrap();
    fs::write(&lyrics, b"[00:01.00]la").unwrap();
    PlaylistEntry::new(audio, lyrics)
}

#[test]
fn next_and_previous_wrap_around() {
    let mut p = abc();
    assert_eq!(p.current_entry(), Some(&entry("a")));

    assert_eq!(p.next(), Some(&entry("b")));
    assert_eq!(p.next(), Some(&entry("c")));
    assert_eq!(p.next(), Some(&entry("a")));
    assert_eq!(p.current_index(), 0);

    assert_eq!(p.previous(), Some(&entry("c")));
    assert_eq!(p.current_index(), 2);
    assert_eq!(p.previous(), Some(&entry("b")));
}

#[test]
fn empty_playlist_has_no_songs() {
    let mut p = Playlist::new("empty");
    assert!(p.is_empty());
    assert_eq!(p.current_entry(), None);
    assert_eq!(p.next(), None);
    assert_eq!(p.previous(), None);
    assert_eq!(p.current_index(), 0);
}

#[test]
fn shuffle_visits_every_song_once_per_cycle() {
    let songs: Vec<PlaylistEntry> = (0..10).map(|i| entry(&i.to_string())).collect();
    let mut p = Playlist::with_entries("many", songs.clone());
    assert!(p.toggle_shuffle());
    assert_eq!(p.current_index(), 0);

    let order = p.shuffle_order().unwrap().to_vec();
    let mut sorted = order.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..10).collect::<Vec<_>>());

    let mut seen = HashSet::new();
    seen.insert(p.current_entry().cloned().unwrap());
    for _ in 1..10 {
        seen.insert(p.next().cloned().unwrap());
    }
    assert_eq!(seen.len(), 10);
    assert_eq!(p.current_entry(), Some(&songs[order[9]]));
}

#[test]
fn toggling_shuffle_off_keeps_the_current_song() {
    let mut p = abc();
    p.toggle_shuffle();
    p.next();
    let playing = p.current_entry().cloned().unwrap();

    assert!(!p.toggle_shuffle());
    assert!(p.shuffle_order().is_none());
    assert_eq!(p.current_entry(), Some(&playing));
}

#[test]
fn set_shuffle_generates_order_lazily() {
    let mut p = abc();
    p.set_shuffle(true);
    assert!(p.is_shuffled());
    assert!(p.shuffle_order().is_none());

    assert!(p.current_entry().is_some());
    assert_eq!(p.shuffle_order().map(<[usize]>::len), Some(3));
}

#[test]
fn reset_returns_to_the_first_song() {
    let mut p = abc();
    p.next();
    p.next();
    p.reset();
    assert_eq!(p.current_index(), 0);
    assert_eq!(p.current_entry(), Some(&entry("a")));
}

#[test]
fn add_and_remove_handle_duplicates() {
    let mut p = abc();
    p.add(entry("a"));
    assert_eq!(p.len(), 4);

    assert!(p.remove(&entry("a")));
    assert_eq!(p.len(), 3);
    assert!(p.contains(&entry("a")));
    assert_eq!(p.entries()[2], entry("a"));

    assert!(!p.remove(&entry("zzz")));
}

#[test]
fn remove_clamps_the_cursor() {
    let mut p = abc();
    p.next();
    p.next();
    assert!(p.remove(&entry("c")));
    assert_eq!(p.current_index(), 1);
    assert_eq!(p.current_entry(), Some(&entry("b")));

    assert!(p.remove(&entry("b")));
    assert!(p.remove(&entry("a")));
    assert_eq!(p.current_index(), 0);
    assert_eq!(p.current_entry(), None);
}

#[test]
fn remove_before_the_cursor_keeps_the_current_song() {
    let mut p = abc();
    p.next();
    p.next();
    assert!(p.remove(&entry("a")));
    assert_eq!(p.current_index(), 1);
    assert_eq!(p.current_entry(), Some(&entry("c")));

    // Removing the current song moves on to the one after it.
    let mut p = abc();
    p.next();
    assert!(p.remove(&entry("b")));
    assert_eq!(p.current_entry(), Some(&entry("c")));
}

#[test]
fn membership_change_regenerates_shuffle_order() {
    let mut p = abc();
    p.toggle_shuffle();
    p.add(entry("d"));
    assert!(p.shuffle_order().is_none());
    assert!(p.current_entry().is_some());
    assert_eq!(p.shuffle_order().map(<[usize]>::len), Some(4));
}

#[test]
fn catalog_create_and_delete() {
    let dir = tempdir().unwrap();
    let mut catalog = PlaylistCatalog::open(dir.path(), &LibrarySettings::default()).unwrap();
    assert!(catalog.is_empty());

    assert!(catalog.create("mix").unwrap());
    assert!(!catalog.create("mix").unwrap());
    assert!(dir.path().join(PLAYLISTS_DIR).join("mix.toml").is_file());
    assert_eq!(catalog.names(), vec!["mix".to_string()]);

    assert!(catalog.delete("mix").unwrap());
    assert!(!catalog.delete("mix").unwrap());
    assert!(!dir.path().join(PLAYLISTS_DIR).join("mix.toml").exists());
}

#[test]
fn catalog_rejects_names_with_separators() {
    let dir = tempdir().unwrap();
    let mut catalog = PlaylistCatalog::open(dir.path(), &LibrarySettings::default()).unwrap();
    assert!(catalog.create("../escape").is_err());
    assert!(catalog.create("").is_err());
}

#[test]
fn catalog_round_trips_songs_and_shuffle() {
    let dir = tempdir().unwrap();
    let a = touch_song(dir.path(), "a");
    let b = touch_song(dir.path(), "b");

    let mut playlist = Playlist::with_entries("faves", vec![a.clone(), b.clone()]);
    playlist.set_shuffle(true);
    {
        let mut catalog =
            PlaylistCatalog::open(dir.path(), &LibrarySettings::default()).unwrap();
        catalog.store(&playlist).unwrap();
    }

    let catalog = PlaylistCatalog::open(dir.path(), &LibrarySettings::default()).unwrap();
    let loaded = catalog.get("faves").unwrap();
    assert_eq!(loaded.entries(), &[a, b]);
    assert!(loaded.is_shuffled());
}

#[test]
fn catalog_drops_missing_songs_but_keeps_empty_playlists() {
    let dir = tempdir().unwrap();
    let kept = touch_song(dir.path(), "kept");
    let gone = touch_song(dir.path(), "gone");

    {
        let mut catalog =
            PlaylistCatalog::open(dir.path(), &LibrarySettings::default()).unwrap();
        catalog
            .store(&Playlist::with_entries("mixed", vec![kept.clone(), gone.clone()]))
            .unwrap();
        catalog
            .store(&Playlist::with_entries("lost", vec![gone.clone()]))
            .unwrap();
    }
    fs::remove_file(&gone.audio).unwrap();

    let catalog = PlaylistCatalog::open(dir.path(), &LibrarySettings::default()).unwrap();
    assert_eq!(catalog.get("mixed").unwrap().entries(), &[kept]);
    assert!(catalog.get("lost").unwrap().is_empty());
}

#[test]
fn catalog_skips_unparseable_files() {
    let dir = tempdir().unwrap();
    let playlists = dir.path().join(PLAYLISTS_DIR);
    fs::create_dir_all(&playlists).unwrap();
    fs::write(playlists.join("broken.toml"), "this is = = not toml").unwrap();
    fs::write(playlists.join("notes.txt"), "ignored").unwrap();

    let catalog = PlaylistCatalog::open(dir.path(), &LibrarySettings::default()).unwrap();
    assert!(catalog.is_empty());
}

#[test]
fn catalog_builds_playlists_from_folders() {
    let dir = tempdir().unwrap();
    touch_song(dir.path(), "root");
    let rock = dir.path().join("rock");
    fs::create_dir_all(&rock).unwrap();
    touch_song(&rock, "one");
    touch_song(&rock, "two");
    fs::create_dir_all(dir.path().join("empty")).unwrap();

    let mut catalog = PlaylistCatalog::open(dir.path(), &LibrarySettings::default()).unwrap();

    let all = catalog.create_from_library().unwrap().unwrap();
    assert_eq!(all.name(), "All Songs");
    assert_eq!(all.len(), 1);

    let created = catalog.scan_library_folders().unwrap();
    assert_eq!(created, vec!["rock".to_string()]);
    assert_eq!(catalog.get("rock").unwrap().len(), 2);

    let named = catalog
        .create_from_folder(&rock, Some("Rock Hits"))
        .unwrap()
        .map(|p| p.name().to_string());
    assert_eq!(named.as_deref(), Some("Rock Hits"));

    assert!(catalog.create_from_folder(&dir.path().join("missing"), None).unwrap().is_none());
}

#[test]
fn catalog_edits_saved_playlists() {
    let dir = tempdir().unwrap();
    let a = touch_song(dir.path(), "a");
    let b = touch_song(dir.path(), "b");

    {
        let mut catalog =
            PlaylistCatalog::open(dir.path(), &LibrarySettings::default()).unwrap();
        assert!(catalog.create("mix").unwrap());
        assert!(catalog.add_song("mix", a.clone()).unwrap());
        assert!(catalog.add_song("mix", b.clone()).unwrap());
        assert!(catalog.add_song("mix", a.clone()).unwrap());
        assert!(!catalog.add_song("nope", a.clone()).unwrap());

        assert!(catalog.remove_song("mix", &a).unwrap());
        assert!(!catalog.remove_song("mix", &touch_song(dir.path(), "c")).unwrap());
        assert!(!catalog.remove_song("nope", &a).unwrap());
    }

    let catalog = PlaylistCatalog::open(dir.path(), &LibrarySettings::default()).unwrap();
    assert_eq!(catalog.get("mix").unwrap().entries(), &[b, a]);
}
