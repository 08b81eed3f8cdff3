//! Integration tests for the local side of a download run

mod common;

use common::{write_tagged_mp3, Tags};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tunesync_core::{missing, ExcludePatterns, FilterSet, M3uPlaylist, Provenance, Song};
use tunesync_local::{
    build_playlist, read_song, relocate, remove_empty_dirs, write_playlist, LocalScanner,
    PathTemplate,
};

const PSYCHO: Tags<'static> = Tags {
    artist: "Muse",
    album: "Drones",
    title: "Psycho",
    track: Some(3),
};

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"not really audio").unwrap();
}

#[test]
fn removed_songs_move_aside_and_folders_are_pruned() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("music");
    let removed_dir = temp.path().join("removed");

    touch(&input.join("Gone").join("Album").join("01.mp3"));
    touch(&input.join("Kept").join("02.mp3"));

    // Unreadable tags make every scanned song keyless, hence "removed"
    let local = LocalScanner::new()
        .scan(&[input.clone()], &ExcludePatterns::none(), &FilterSet::new())
        .unwrap();
    let to_move: Vec<Song> = missing(&local.all(), &[])
        .into_iter()
        .filter(|song| song.local_path().unwrap().starts_with(input.join("Gone")))
        .collect();
    assert_eq!(to_move.len(), 1);

    for song in &to_move {
        relocate(song.local_path().unwrap(), &input, &removed_dir).unwrap();
    }
    remove_empty_dirs(&input, false).unwrap();

    assert!(removed_dir.join("Gone").join("Album").join("01.mp3").exists());
    assert!(!input.join("Gone").exists());
    assert!(input.join("Kept").join("02.mp3").exists());
    assert!(input.exists());
}

#[test]
fn rescan_after_download_sees_new_files() {
    let temp = TempDir::new().unwrap();
    let template = PathTemplate::parse(
        &format!("{}/%artist%/%title%", temp.path().display()),
        Path::new("/"),
    );
    let song = Song::manager("m1").with_artist("Muse").with_title("Uprising");

    let base = template.base_path(&[song.clone()]);
    assert_eq!(base, temp.path().join("Muse"));

    let scanner = LocalScanner::new();
    let before = scanner
        .scan(&[base.clone()], &ExcludePatterns::none(), &FilterSet::new())
        .unwrap();
    assert!(before.is_empty());

    touch(&template.resolve_with_extension(&song, "mp3"));

    let after = scanner
        .scan(&[base], &ExcludePatterns::none(), &FilterSet::new())
        .unwrap();
    assert_eq!(after.matched.len(), 1);
}

#[test]
fn playlist_files_point_into_the_library() {
    let temp = TempDir::new().unwrap();
    let template = PathTemplate::parse(
        &format!("{}/library/%albumartist%/%track2% - %title%", temp.path().display()),
        Path::new("/"),
    );
    let playlists_dir: PathBuf = temp.path().join("playlists");

    let songs = vec![
        Song::mobile("a", None)
            .with_artist("Air")
            .with_title("Playground Love")
            .with_track_number(3)
            .with_duration_seconds(213),
        Song::mobile("b", None).with_artist("Blur").with_title("Tender"),
    ];
    let playlist: M3uPlaylist = build_playlist(&songs, &template, &playlists_dir, "mp3");
    let path = write_playlist(&playlists_dir, "Chill", &playlist).unwrap();

    assert_eq!(path, playlists_dir.join("Chill.m3u"));
    let text = String::from_utf8(fs::read(&path).unwrap()).unwrap();
    assert_eq!(
        text,
        "\u{feff}#EXTM3U\n\
         #EXTINF,213,Air - Playground Love\n\
         ../library/Air/03 - Playground Love.mp3\n\
         #EXTINF,0,Blur - Tender\n\
         ../library/Blur/00 - Tender.mp3"
    );
}

#[test]
fn tags_are_read_from_id3v2() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("psycho.mp3");
    write_tagged_mp3(&path, &PSYCHO);

    let song = read_song(&path).unwrap();
    assert_eq!(song.provenance(), Provenance::Local);
    assert_eq!(song.local_path(), Some(path.as_path()));
    assert_eq!(song.artist.as_deref(), Some("Muse"));
    assert_eq!(song.album.as_deref(), Some("Drones"));
    assert_eq!(song.title.as_deref(), Some("Psycho"));
    assert_eq!(song.track_number, Some(3));
}

#[test]
fn tagged_local_songs_match_account_songs() {
    let temp = TempDir::new().unwrap();
    let tagged = temp.path().join("Muse").join("03 Psycho.mp3");
    let untagged = temp.path().join("Muse").join("unknown.mp3");
    write_tagged_mp3(&tagged, &PSYCHO);
    touch(&untagged);

    let local = LocalScanner::new()
        .scan(
            &[temp.path().to_path_buf()],
            &ExcludePatterns::none(),
            &FilterSet::new(),
        )
        .unwrap();
    assert_eq!(local.matched.len(), 2);

    // Tag text is compared normalized, so case and punctuation differ freely
    let account = vec![Song::manager("m1")
        .with_artist("MUSE")
        .with_album("Drones!")
        .with_title("psycho")
        .with_track_number(3)];

    let to_upload = missing(&local.matched, &account);
    assert_eq!(to_upload.len(), 1);
    assert_eq!(to_upload[0].local_path(), Some(untagged.as_path()));

    assert!(missing(&account, &local.matched).is_empty());
}
