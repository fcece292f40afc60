//! XSPF (XML Shareable Playlist Format) rendering.
//!
//! The document layout is fixed and written without indentation:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <playlist version="1" xmlns="http://xspf.org/ns/0/"><trackList>
//!   <track><creator>..</creator><album>..</album><title>..</title></track>
//! </trackList></playlist>
//! ```
//!
//! Children of `<track>` always appear in creator, album, title order and are
//! only written for fields that hold a non-empty value. Text is escaped for
//! the five XML special characters and otherwise left untouched.

use quick_xml::escape::escape;

use crate::types::Track;

const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?><playlist version="1" xmlns="http://xspf.org/ns/0/"><trackList>"#;
const FOOTER: &str = "</trackList></playlist>";

/// Renders `tracks` into a complete XSPF document.
///
/// The `<album>` element is only written when `include_album` is set.
/// An empty slice still yields a valid document with an empty track list.
pub fn render(tracks: &[Track], include_album: bool) -> String {
    let mut xspf = String::from(HEADER);
    for track in tracks {
        push_track(&mut xspf, track, include_album);
    }
    xspf.push_str(FOOTER);
    xspf
}

/// Renders a single `<track>` element, exactly as [`render`] writes it
/// inside the track list.
///
/// # Example
///
/// ```
/// let track = Track::new(Some("Hey Jude"), Some("The Beatles"), None);
/// assert_eq!(
///     render_track(&track, false),
///     "<track><creator>The Beatles</creator><title>Hey Jude</title></track>"
/// );
/// ```
pub fn render_track(track: &Track, include_album: bool) -> String {
    let mut fragment = String::new();
    push_track(&mut fragment, track, include_album);
    fragment
}

fn push_track(out: &mut String, track: &Track, include_album: bool) {
    out.push_str("<track>");
    push_element(out, "creator", track.artist.as_deref());
    if include_album {
        push_element(out, "album", track.album.as_deref());
    }
    push_element(out, "title", track.title.as_deref());
    out.push_str("</track>");
}

fn push_element(out: &mut String, name: &str, value: Option<&str>) {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return;
    };
    out.push('<');
    out.push_str(name);
    out.push('>');
    out.push_str(&escape(value));
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}
