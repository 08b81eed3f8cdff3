//! Audio fixtures with real ID3v2 tags

use std::fs;
use std::path::Path;

/// Tags written into a fixture file
pub struct Tags<'a> {
    pub artist: &'a str,
    pub album: &'a str,
    pub title: &'a str,
    pub track: Option<u32>,
}

/// Write a minimal MP3 file carrying an ID3v2.3 tag
///
/// The tag is followed by a few silent MPEG-1 Layer III frames so the file
/// probes as MP3.
pub fn write_tagged_mp3(path: &Path, tags: &Tags<'_>) {
    let mut frames: Vec<u8> = Vec::new();
    text_frame(&mut frames, b"TIT2", tags.title);
    text_frame(&mut frames, b"TPE1", tags.artist);
    text_frame(&mut frames, b"TALB", tags.album);
    if let Some(track) = tags.track {
        text_frame(&mut frames, b"TRCK", &track.to_string());
    }

    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"ID3");
    bytes.extend_from_slice(&[0x03, 0x00, 0x00]);

    // Tag size is a syncsafe integer, 7 bits per byte
    let size = frames.len();
    bytes.extend_from_slice(&[
        ((size >> 21) & 0x7F) as u8,
        ((size >> 14) & 0x7F) as u8,
        ((size >> 7) & 0x7F) as u8,
        (size & 0x7F) as u8,
    ]);
    bytes.extend_from_slice(&frames);

    for _ in 0..8 {
        bytes.extend_from_slice(&silent_mpeg_frame());
    }

    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, bytes).unwrap();
}

/// ID3v2.3 text frame, ISO-8859-1 encoded
fn text_frame(buffer: &mut Vec<u8>, id: &[u8; 4], text: &str) {
    if text.is_empty() {
        return;
    }

    let mut content = vec![0x00];
    content.extend(text.chars().map(|c| c as u8));

    buffer.extend_from_slice(id);
    buffer.extend_from_slice(&(content.len() as u32).to_be_bytes());
    buffer.extend_from_slice(&[0x00, 0x00]);
    buffer.extend_from_slice(&content);
}

/// 128kbps, 44.1kHz, stereo, no padding: 417 bytes
fn silent_mpeg_frame() -> [u8; 417] {
    let mut frame = [0u8; 417];
    frame[0] = 0xFF;
    frame[1] = 0xFB;
    frame[2] = 0x90;
    frame[3] = 0x00;
    frame
}
