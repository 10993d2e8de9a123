//! Line classification
//!
//! Play scripts in this format carry no markup: structure is encoded in
//! the number of leading spaces on each line, treated as fixed columns.
//!
//! | Leading spaces | Meaning                                              |
//! |----------------|------------------------------------------------------|
//! | 46 and more    | page numbers, production marks (ignored)             |
//! | 18 to 45       | speaker names, dialogue, lyrics, song titles         |
//! | 3 to 17        | narration, scene headings, dual-speaker blocks       |
//! | 0 to 2         | title page, credits (ignored)                        |
//!
//! [`classify`] is a pure function of the line; what a speaker-column or
//! narration-column line actually means depends on parser state and is
//! decided by the parser.

/// Leading spaces marking a page-number or production-marker line
pub const PAGE_MARKER_INDENT: usize = 46;
/// Start of the speaker/dialogue/lyric column
pub const SPEAKER_COLUMN_INDENT: usize = 18;
/// Inside dialogue, a speaker-column line this deep opens a new speaker
pub const NEW_SPEAKER_INDENT: usize = 28;
/// Minimum indent of a dual-speaker heading
pub const DUAL_HEADING_INDENT: usize = 4;
/// Start of the narration column
pub const NARRATION_INDENT: usize = 3;

/// Gap between the two names of a dual-speaker heading (30 spaces)
pub const DUAL_HEADING_SEPARATOR: &str = "                              ";
/// Gap between the two text columns of dual dialogue (10 spaces)
pub const DUAL_COLUMN_SEPARATOR: &str = "          ";

/// Speaker suffix for a resumed utterance
pub const CONTINUATION_MARKER: &str = "(CONT'D)";
/// Line that ends the script
pub const END_SENTINEL: &str = "THE END";
/// Prefix of the line naming the opening scene
pub const OPENING_MARKER: &str = "OPEN ON:";

const SCENE_PREFIXES: [&str; 2] = ["EXT. ", "INT. "];
const SCENE_SEPARATORS: [&str; 2] = [" -- ", " - "];

/// Structural category of one input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty line
    Blank,
    /// `THE END`
    EndOfScript,
    /// Anything carrying no content
    Ignore,
    /// A quoted title in the speaker column announcing a song
    SongTitle,
    /// Speaker name, dialogue or lyric line
    SpeakerOrLyricColumn { text: &'a str, indent: usize },
    /// Two speaker names side by side
    DualSpeakerHeading { left: &'a str, right: &'a str },
    /// `INT.`/`EXT.` heading split into place and time
    SceneHeading { place: &'a str, time: &'a str },
    /// `INT.`/`EXT.` heading without a place/time separator
    MalformedSceneHeading { text: &'a str },
    /// Narration, or one or two columns of dual dialogue
    NarrationOrDualColumnLine { text: &'a str },
}

/// Which columns of a dual-dialogue line carry text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DualColumns<'a> {
    Left(&'a str),
    Right(&'a str),
    Both(&'a str, &'a str),
}

/// Classify one raw line, leading whitespace intact
///
/// A trailing `\n` or `\r\n` is ignored.
pub fn classify(line: &str) -> LineKind<'_> {
    let line = strip_terminator(line);
    let text = line.trim();

    if text == END_SENTINEL {
        return LineKind::EndOfScript;
    }
    if line.is_empty() {
        return LineKind::Blank;
    }
    if text.is_empty() {
        return LineKind::Ignore;
    }

    let indent = indent_of(line);
    if indent >= PAGE_MARKER_INDENT {
        LineKind::Ignore
    } else if indent >= SPEAKER_COLUMN_INDENT {
        if text.starts_with('"') {
            LineKind::SongTitle
        } else {
            LineKind::SpeakerOrLyricColumn { text, indent }
        }
    } else if indent >= NARRATION_INDENT {
        if indent >= DUAL_HEADING_INDENT {
            if let Some((left, right)) = split_dual_heading(text) {
                return LineKind::DualSpeakerHeading { left, right };
            }
        }
        match scene_heading_body(text) {
            Some(body) => match split_scene_heading(body) {
                Some((place, time)) => LineKind::SceneHeading { place, time },
                None => LineKind::MalformedSceneHeading { text },
            },
            None => LineKind::NarrationOrDualColumnLine { text },
        }
    } else {
        LineKind::Ignore
    }
}

/// Remove one trailing line terminator
pub fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Number of leading spaces
pub fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// Split a dual-speaker heading into its two raw name fragments
///
/// Exactly two fragments are required.
pub fn split_dual_heading(text: &str) -> Option<(&str, &str)> {
    let mut parts = text.split(DUAL_HEADING_SEPARATOR);
    let left = parts.next()?.trim();
    let right = parts.next()?.trim();
    if parts.next().is_some() || left.is_empty() || right.is_empty() {
        return None;
    }
    Some((left, right))
}

/// Text after an `EXT. ` or `INT. ` prefix
pub fn scene_heading_body(text: &str) -> Option<&str> {
    SCENE_PREFIXES
        .iter()
        .find_map(|prefix| text.strip_prefix(prefix))
}

/// Split `PLACE -- TIME`, falling back to `PLACE - TIME`
pub fn split_scene_heading(body: &str) -> Option<(&str, &str)> {
    SCENE_SEPARATORS.iter().find_map(|sep| {
        let mut parts = body.split(sep);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(place), Some(time), None) => Some((place.trim(), time.trim())),
            _ => None,
        }
    })
}

/// Split one line of dual dialogue into its columns
pub fn split_dual_columns(text: &str) -> DualColumns<'_> {
    let mut parts = text.split(DUAL_COLUMN_SEPARATOR);
    let first = parts.next().unwrap_or_default().trim();
    match parts.last() {
        None => DualColumns::Left(first),
        Some(last) if first.is_empty() => DualColumns::Right(last.trim()),
        Some(last) => DualColumns::Both(first, last.trim()),
    }
}

/// Speaker name: everything before the first `(`, trimmed
pub fn speaker_name(text: &str) -> &str {
    text.split('(').next().unwrap_or_default().trim()
}

/// Whether a speaker line carries the `(CONT'D)` marker
pub fn is_continuation(text: &str) -> bool {
    text.contains(CONTINUATION_MARKER)
}

/// Place named by an `OPEN ON:` line
pub fn opening_place(line: &str) -> Option<&str> {
    line.trim().strip_prefix(OPENING_MARKER).map(str::trim)
}
