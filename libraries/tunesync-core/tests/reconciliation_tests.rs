//! End-to-end reconciliation scenarios over the core types

use tunesync_core::{
    classify, missing, sort_for_transfer, ExcludePatterns, FilterSet, FilterVerdict, M3uPlaylist,
    PlaylistEntry, RemoteLookup, RemotePlaylist, Song,
};

fn local(path: &str, artist: &str, album: &str, title: &str, track: u32) -> Song {
    Song::local(path)
        .with_artist(artist)
        .with_album(album)
        .with_title(title)
        .with_track_number(track)
}

fn manager(id: &str, artist: &str, album: &str, title: &str, track: u32) -> Song {
    Song::manager(id)
        .with_artist(artist)
        .with_album(album)
        .with_title(title)
        .with_track_number(track)
}

#[test]
fn upload_reports_only_new_local_songs() {
    let local_songs = vec![
        local("/m/1.mp3", "Radiohead", "OK Computer", "Airbag", 1),
        local("/m/2.mp3", "Radiohead", "OK Computer", "Paranoid Android", 2),
        local("/m/3.mp3", "The Beatles", "Abbey Road", "Come Together", 1),
    ];
    let remote = vec![
        manager("a", "radiohead", "ok computer", "airbag", 1),
        manager("b", "Beatles", "Abbey Road", "Come Together", 1),
    ];

    let local = classify(local_songs, &ExcludePatterns::none(), &FilterSet::new());
    let to_upload = missing(&local.matched, &remote);

    assert_eq!(to_upload.len(), 1);
    assert_eq!(to_upload[0].title.as_deref(), Some("Paranoid Android"));
}

#[test]
fn include_filters_combine_with_or_by_default() {
    let song = local("/m/1.mp3", "Muse", "Drones", "Psycho", 2);
    let filters = |all| {
        FilterSet::parse(
            &["artist:Muse".to_string(), "album:Absolution".to_string()],
            &[],
            all,
            false,
        )
        .unwrap()
    };

    assert_eq!(filters(false).evaluate(&song), FilterVerdict::Included);
    assert_eq!(filters(true).evaluate(&song), FilterVerdict::Filtered);
}

#[test]
fn exclude_filter_wins_over_include() {
    let song = local("/m/1.mp3", "Muse", "Drones", "Psycho", 2);
    let filters = FilterSet::parse(
        &["artist:Muse".to_string()],
        &["title:Psycho".to_string()],
        false,
        false,
    )
    .unwrap();

    assert_eq!(filters.evaluate(&song), FilterVerdict::Filtered);
}

#[test]
fn removed_detection_sees_every_local_bucket() {
    let local_songs = vec![
        local("/m/keep.mp3", "A", "X", "Kept", 1),
        local("/m/live/gone.mp3", "A", "X", "Gone", 2),
        local("/m/other.mp3", "B", "Y", "Filtered but kept", 1),
    ];
    let remote = vec![
        manager("1", "A", "X", "Kept", 1),
        manager("2", "B", "Y", "Filtered but kept", 1),
    ];
    let exclude = ExcludePatterns::parse(&["/live/".to_string()]).unwrap();
    let filters = FilterSet::parse(&["artist:^A$".to_string()], &[], false, false).unwrap();

    let local = classify(local_songs, &exclude, &filters);
    assert_eq!(local.excluded.len(), 1);
    assert_eq!(local.filtered.len(), 1);

    let removed = missing(&local.all(), &remote);
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].title.as_deref(), Some("Gone"));
}

#[test]
fn download_list_is_sorted_for_transfer() {
    let remote = vec![
        manager("1", "Blur", "Parklife", "Girls & Boys", 1),
        manager("2", "Blur", "Blur", "Song 2", 2),
        manager("3", "Air", "Moon Safari", "La Femme d'Argent", 1),
    ];

    let mut to_download = missing(&remote, &[]);
    sort_for_transfer(&mut to_download);

    let ids: Vec<_> = to_download.iter().filter_map(Song::remote_id).collect();
    assert_eq!(ids, vec!["3", "2", "1"]);
}

#[test]
fn playlist_flow_resolves_through_manager_view() {
    let manager_songs = vec![
        manager("t1", "A", "X", "One", 1),
        manager("t2", "A", "X", "Two", 2),
    ];
    let mobile_songs = vec![
        Song::mobile("p1", Some("t1".to_string()))
            .with_artist("A")
            .with_title("One")
            .with_duration_seconds(180),
        Song::mobile("p2", Some("t2".to_string()))
            .with_artist("A")
            .with_title("Two"),
    ];
    let playlists = vec![RemotePlaylist::new(
        "Road Trip",
        vec![
            PlaylistEntry::new("e1", Some("t2".to_string())),
            PlaylistEntry::new("e2", Some("t1".to_string())),
            PlaylistEntry::new("e3", Some("t2".to_string())),
        ],
    )];

    let lookup = RemoteLookup::new(&mobile_songs, &manager_songs);
    let tracks = lookup.playlist_tracks(&playlists);
    assert_eq!(tracks.len(), 2);

    let already_local = vec![local("/m/two.mp3", "A", "X", "Two", 2)];
    let to_download = missing(&tracks, &already_local);
    assert_eq!(to_download.len(), 1);
    assert_eq!(to_download[0].remote_id(), Some("t1"));

    let mut m3u = M3uPlaylist::new();
    for song in lookup.playlist_songs(&playlists[0]) {
        m3u.push(
            song.duration_seconds,
            song.artist.as_deref(),
            song.title.as_deref(),
            "x.mp3",
        );
    }
    assert_eq!(m3u.len(), 3);
    assert!(m3u.to_string().contains("#EXTINF,180,A - One"));
}
