//! Terminal output of song lists
//!
//! Lists go to stdout even with `--quiet`; only the headings are dropped.

use tunesync_core::{RunContext, Song};

pub(crate) fn song_list(ctx: RunContext, heading: &str, empty: &str, songs: &[Song]) {
    if songs.is_empty() {
        if !ctx.quiet {
            println!("\n{}", empty);
        }
        return;
    }

    if !ctx.quiet {
        println!("\n{}:\n", heading);
    }
    for song in songs {
        println!("{}", song);
    }
}

pub(crate) fn found(ctx: RunContext, count: usize, action: &str) {
    if !ctx.quiet {
        println!("\nFound {} song(s) to {}", count, action);
    }
}
