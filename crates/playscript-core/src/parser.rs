//! Play script parser
//!
//! This module decodes a fixed-column play script into a
//! `playscript_ast::ScriptDocument`. Lines are read one at a time,
//! classified by [`classify`](crate::classifier::classify), and folded
//! into a state machine that accumulates utterance text and flushes
//! finished blocks into the document.
//!
//! # Example
//!
//! ```
//! use playscript_ast::UtteranceKind;
//! use playscript_core::parse;
//!
//! let script = [
//!     "OPEN ON: A QUIET STREET",
//!     "",
//!     "                      ANNA",
//!     "                  Hello there.",
//!     "THE END",
//! ]
//! .join("\n");
//!
//! let doc = parse(&script)?;
//! assert_eq!(doc.len(), 2);
//! let line = doc.utterances().next().unwrap();
//! assert_eq!(line.kind, UtteranceKind::Dialogue);
//! assert_eq!(line.text, "Hello there.");
//! # Ok::<(), playscript_core::ParseError>(())
//! ```

use std::io::BufRead;

use playscript_ast::{SceneHeading, ScriptDocument, Utterance, UtteranceKind};
use tracing::{debug, info, trace, warn};

use crate::classifier::{
    classify, is_continuation, opening_place, speaker_name, split_dual_columns, DualColumns,
    LineKind, NEW_SPEAKER_INDENT,
};
use crate::error::{ParseError, Result};

/// Observable parser state, without the in-progress text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserPhase {
    /// No block open
    Idle,
    /// Accumulating narration text
    Narration,
    /// Accumulating one speaker's dialogue
    Dialogue,
    /// Accumulating song lyrics
    Song,
    /// A song title was seen; the next speaker-column line names the singer
    ExpectingSongSpeaker,
    /// Two speakers talking simultaneously
    DualColumn,
}

/// Whether the caller should keep feeding lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Parser state, owning whatever utterances are being accumulated
#[derive(Debug, Clone, PartialEq)]
enum ParserState {
    Idle,
    Narration(Utterance),
    Dialogue(Utterance),
    Song(Utterance),
    ExpectingSongSpeaker,
    DualColumn { left: Utterance, right: Utterance },
}

impl ParserState {
    fn phase(&self) -> ParserPhase {
        match self {
            ParserState::Idle => ParserPhase::Idle,
            ParserState::Narration(_) => ParserPhase::Narration,
            ParserState::Dialogue(_) => ParserPhase::Dialogue,
            ParserState::Song(_) => ParserPhase::Song,
            ParserState::ExpectingSongSpeaker => ParserPhase::ExpectingSongSpeaker,
            ParserState::DualColumn { .. } => ParserPhase::DualColumn,
        }
    }
}

/// Streaming play script parser
///
/// Feed it lines with [`feed_line`](Self::feed_line), or drive the
/// state machine directly with already-classified lines through
/// [`apply`](Self::apply).
#[derive(Debug, Clone)]
pub struct ScriptParser {
    document: ScriptDocument,
    state: ParserState,
    /// Kind of the last finalized dialogue/song block, for `(CONT'D)` lines
    last_kind: Option<UtteranceKind>,
    /// Whether the `OPEN ON:` line has been seen
    opened: bool,
    finished: bool,
    line_number: usize,
}

impl ScriptParser {
    pub fn new() -> Self {
        Self {
            document: ScriptDocument::new(),
            state: ParserState::Idle,
            last_kind: None,
            opened: false,
            finished: false,
            line_number: 0,
        }
    }

    pub fn phase(&self) -> ParserPhase {
        self.state.phase()
    }

    /// Entries finalized so far
    pub fn document(&self) -> &ScriptDocument {
        &self.document
    }

    /// Utterances still being accumulated, left column first
    pub fn in_progress(&self) -> Vec<&Utterance> {
        match &self.state {
            ParserState::Idle | ParserState::ExpectingSongSpeaker => Vec::new(),
            ParserState::Narration(u) | ParserState::Dialogue(u) | ParserState::Song(u) => {
                vec![u]
            }
            ParserState::DualColumn { left, right } => vec![left, right],
        }
    }

    pub fn last_kind(&self) -> Option<UtteranceKind> {
        self.last_kind
    }

    /// Whether the opening scene has been found
    pub fn is_opened(&self) -> bool {
        self.opened
    }

    /// Whether `THE END` has been reached
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Number of lines fed so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Feed one raw line, with leading whitespace and terminator intact
    ///
    /// Lines before the first `OPEN ON:` line are skipped; that line
    /// becomes the document's first scene heading.
    pub fn feed_line(&mut self, line: &str) -> Result<Flow> {
        if self.finished {
            return Ok(Flow::Stop);
        }
        self.line_number += 1;

        if !self.opened {
            if let Some(place) = opening_place(line) {
                debug!(line = self.line_number, place, "Found opening scene");
                self.document.append(SceneHeading::new("", place));
                self.opened = true;
            }
            return Ok(Flow::Continue);
        }

        let kind = classify(line);
        trace!(line = self.line_number, ?kind, "Classified line");
        self.apply(kind)
    }

    /// Apply one classified line to the state machine
    pub fn apply(&mut self, kind: LineKind<'_>) -> Result<Flow> {
        if self.finished {
            return Ok(Flow::Stop);
        }

        match kind {
            LineKind::Ignore => {}
            LineKind::Blank => {
                // Only dual dialogue ends at a blank line
                if let ParserState::DualColumn { .. } = self.state {
                    self.close_block();
                }
            }
            LineKind::SongTitle => {
                self.close_block();
                self.state = ParserState::ExpectingSongSpeaker;
            }
            LineKind::SpeakerOrLyricColumn { text, indent } => {
                self.handle_speaker_column(text, indent);
            }
            LineKind::DualSpeakerHeading { left, right } => {
                self.close_block();
                let left = self.open_speech(left, UtteranceKind::Dialogue);
                let right = self.open_speech(right, UtteranceKind::Dialogue);
                self.state = ParserState::DualColumn { left, right };
            }
            LineKind::SceneHeading { place, time } => {
                self.close_block();
                debug!(line = self.line_number, place, time, "Scene heading");
                self.document.append(SceneHeading::new(time, place));
            }
            LineKind::MalformedSceneHeading { text } => {
                return Err(ParseError::malformed_scene_heading(self.line_number, text));
            }
            LineKind::NarrationOrDualColumnLine { text } => {
                self.handle_narration_column(text);
            }
            LineKind::EndOfScript => {
                self.close_block();
                self.finished = true;
                return Ok(Flow::Stop);
            }
        }

        Ok(Flow::Continue)
    }

    /// Flush any open block and return the document
    pub fn finish(mut self) -> ScriptDocument {
        self.close_block();
        self.document
    }

    /// Handle a line in the speaker/dialogue/lyric column
    fn handle_speaker_column(&mut self, text: &str, indent: usize) {
        match &mut self.state {
            ParserState::ExpectingSongSpeaker => {
                let song = self.open_speech(text, UtteranceKind::Song);
                self.state = ParserState::Song(song);
            }
            ParserState::Song(song) => song.push_line(text),
            ParserState::Dialogue(dialogue) if indent < NEW_SPEAKER_INDENT => {
                dialogue.push_line(text);
            }
            _ => {
                // A new speaker name
                self.close_block();
                let dialogue = self.open_speech(text, UtteranceKind::Dialogue);
                self.state = ParserState::Dialogue(dialogue);
            }
        }
    }

    /// Handle a line in the narration column
    fn handle_narration_column(&mut self, text: &str) {
        match &mut self.state {
            ParserState::DualColumn { left, right } => match split_dual_columns(text) {
                DualColumns::Left(l) => left.push_line(l),
                DualColumns::Right(r) => right.push_line(r),
                DualColumns::Both(l, r) => {
                    left.push_line(l);
                    right.push_line(r);
                }
            },
            ParserState::Narration(narration) => narration.push_line(text),
            _ => {
                self.close_block();
                debug!(line = self.line_number, "Opening narration");
                self.state = ParserState::Narration(Utterance::narration(text));
            }
        }
    }

    /// Start a dialogue or song block from a speaker line
    ///
    /// A `(CONT'D)` speaker inherits the kind of the last finalized
    /// speech block, or dialogue if there is none yet.
    fn open_speech(&mut self, text: &str, default_kind: UtteranceKind) -> Utterance {
        let name = speaker_name(text);
        let continued = is_continuation(text);
        let kind = if continued {
            self.last_kind.unwrap_or(UtteranceKind::Dialogue)
        } else {
            default_kind
        };
        let speaker = self.document.characters_mut().resolve_or_create(name);
        debug!(line = self.line_number, name, ?kind, continued, "Opening utterance");
        Utterance::spoken(kind, continued, speaker)
    }

    /// Finalize whatever is open and return to idle
    fn close_block(&mut self) {
        let state = std::mem::replace(&mut self.state, ParserState::Idle);

        match state {
            ParserState::Idle | ParserState::ExpectingSongSpeaker => {}
            ParserState::Narration(narration) => self.finalize(narration),
            ParserState::Dialogue(speech) | ParserState::Song(speech) => {
                self.last_kind = Some(speech.kind);
                self.finalize(speech);
            }
            ParserState::DualColumn { left, right } => {
                self.last_kind = Some(left.kind);
                self.finalize(left);
                self.finalize(right);
            }
        }
    }

    fn finalize(&mut self, utterance: Utterance) {
        debug!(line = self.line_number, kind = ?utterance.kind, "Finalized utterance");
        self.document.append(utterance);
    }
}

impl Default for ScriptParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a play script from a buffered reader.
///
/// Reading stops at `THE END` or end of input, whichever comes first.
///
/// # Errors
///
/// * [`ParseError::MalformedSceneHeading`] for an `INT.`/`EXT.` line
///   without a place/time separator
/// * [`ParseError::Io`] if the reader fails
///
/// Any other unexpected line is dropped silently.
pub fn parse_reader<R: BufRead>(mut reader: R) -> Result<ScriptDocument> {
    let mut parser = ScriptParser::new();
    let mut line = String::new();

    loop {
        line.clear();
        let read = reader
            .read_line(&mut line)
            .map_err(|source| ParseError::Io {
                line: parser.line_number() + 1,
                source,
            })?;
        if read == 0 || parser.feed_line(&line)? == Flow::Stop {
            break;
        }
    }

    if !parser.is_opened() {
        warn!(
            lines = parser.line_number(),
            "No OPEN ON: line found, document is empty"
        );
    }

    let document = parser.finish();
    info!(
        entries = document.len(),
        characters = document.characters().len(),
        "Parsed script"
    );
    Ok(document)
}

/// Parse play script text into a [`ScriptDocument`].
pub fn parse(text: &str) -> Result<ScriptDocument> {
    parse_reader(text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use playscript_ast::Entry;

    fn speaker(text: &str) -> LineKind<'_> {
        LineKind::SpeakerOrLyricColumn { text, indent: 25 }
    }

    fn lyric(text: &str) -> LineKind<'_> {
        LineKind::SpeakerOrLyricColumn { text, indent: 18 }
    }

    fn narration(text: &str) -> LineKind<'_> {
        LineKind::NarrationOrDualColumnLine { text }
    }

    fn drive(parser: &mut ScriptParser, lines: &[LineKind<'_>]) {
        for line in lines {
            parser.apply(*line).unwrap();
        }
    }

    fn texts(doc: &ScriptDocument) -> Vec<&str> {
        doc.utterances().map(|u| u.text.as_str()).collect()
    }

    #[test]
    fn test_starts_idle() {
        let parser = ScriptParser::new();
        assert_eq!(parser.phase(), ParserPhase::Idle);
        assert!(parser.in_progress().is_empty());
        assert!(!parser.is_opened());
    }

    #[test]
    fn test_lines_before_opening_are_skipped() {
        let mut parser = ScriptParser::new();
        parser.feed_line("FROZEN\n").unwrap();
        parser.feed_line("                  Written by\n").unwrap();
        assert!(parser.document().is_empty());

        parser.feed_line("OPEN ON: THE FJORD\n").unwrap();
        assert!(parser.is_opened());
        assert_eq!(
            parser.document().entries()[0],
            Entry::SceneHeading(SceneHeading::new("", "THE FJORD"))
        );
    }

    #[test]
    fn test_speaker_then_dialogue_lines() {
        let mut parser = ScriptParser::new();
        drive(&mut parser, &[speaker("ANNA"), lyric("Hello"), lyric("there.")]);
        assert_eq!(parser.phase(), ParserPhase::Dialogue);
        assert_eq!(parser.in_progress()[0].text, "Hello there.");
        assert!(parser.document().is_empty());

        let doc = parser.finish();
        assert_eq!(texts(&doc), vec!["Hello there."]);
    }

    #[test]
    fn test_deep_speaker_column_reopens_dialogue() {
        let mut parser = ScriptParser::new();
        drive(&mut parser, &[speaker("ANNA"), lyric("Hi.")]);
        parser
            .apply(LineKind::SpeakerOrLyricColumn {
                text: "ELSA",
                indent: NEW_SPEAKER_INDENT,
            })
            .unwrap();

        assert_eq!(parser.phase(), ParserPhase::Dialogue);
        assert_eq!(parser.document().len(), 1);
        let open = parser.in_progress()[0];
        assert_eq!(parser.document().speaker_of(open).unwrap().name, "ELSA");
    }

    #[test]
    fn test_blank_lines_do_not_end_single_blocks() {
        let mut parser = ScriptParser::new();
        drive(
            &mut parser,
            &[speaker("ANNA"), lyric("Wait,"), LineKind::Blank, lyric("come back!")],
        );
        assert_eq!(parser.phase(), ParserPhase::Dialogue);
        assert_eq!(parser.in_progress()[0].text, "Wait, come back!");
    }

    #[test]
    fn test_song_title_expects_singer() {
        let mut parser = ScriptParser::new();
        drive(&mut parser, &[speaker("ANNA"), lyric("Elsa?"), LineKind::SongTitle]);
        assert_eq!(parser.phase(), ParserPhase::ExpectingSongSpeaker);
        assert_eq!(parser.last_kind(), Some(UtteranceKind::Dialogue));

        drive(
            &mut parser,
            &[lyric("YOUNG ANNA"), lyric("Do you want to"), lyric("build a snowman?")],
        );
        assert_eq!(parser.phase(), ParserPhase::Song);

        let doc = parser.finish();
        let song = doc.utterances().nth(1).unwrap();
        assert_eq!(song.kind, UtteranceKind::Song);
        assert_eq!(song.text, "Do you want to build a snowman?");
        assert_eq!(doc.speaker_of(song).unwrap().name, "YOUNG ANNA");
    }

    #[test]
    fn test_continuation_inherits_song_kind() {
        let mut parser = ScriptParser::new();
        drive(
            &mut parser,
            &[
                LineKind::SongTitle,
                lyric("ANNA"),
                lyric("The window is open!"),
                narration("She twirls."),
                speaker("ANNA (CONT'D)"),
                lyric("And so's that door!"),
            ],
        );
        let doc = parser.finish();
        let kinds: Vec<_> = doc.utterances().map(|u| (u.kind, u.continued)).collect();
        assert_eq!(
            kinds,
            vec![
                (UtteranceKind::Song, false),
                (UtteranceKind::Narration, false),
                (UtteranceKind::Song, true),
            ]
        );
    }

    #[test]
    fn test_continuation_without_prior_block_defaults_to_dialogue() {
        let mut parser = ScriptParser::new();
        drive(&mut parser, &[speaker("OLAF (CONT'D)"), lyric("Hi!")]);
        let doc = parser.finish();
        let first = doc.utterances().next().unwrap();
        assert_eq!(first.kind, UtteranceKind::Dialogue);
        assert!(first.continued);
    }

    #[test]
    fn test_narration_accumulates_and_flushes_on_speaker() {
        let mut parser = ScriptParser::new();
        drive(
            &mut parser,
            &[narration("Snow falls."), narration("A wolf howls."), speaker("KRISTOFF")],
        );
        assert_eq!(parser.document().len(), 1);
        assert_eq!(texts(parser.document()), vec!["Snow falls. A wolf howls."]);
        // narration never becomes the inherited kind
        assert_eq!(parser.last_kind(), None);
    }

    #[test]
    fn test_dual_column_flushes_pair_on_blank() {
        let mut parser = ScriptParser::new();
        drive(
            &mut parser,
            &[
                LineKind::DualSpeakerHeading {
                    left: "ANNA",
                    right: "HANS",
                },
                narration("I mean it's crazy...          We finish each"),
                narration("Sandwiches!"),
            ],
        );
        assert_eq!(parser.phase(), ParserPhase::DualColumn);
        assert_eq!(parser.in_progress().len(), 2);

        parser.apply(LineKind::Blank).unwrap();
        assert_eq!(parser.phase(), ParserPhase::Idle);

        let doc = parser.document();
        let pair: Vec<_> = doc
            .utterances()
            .map(|u| (doc.speaker_of(u).unwrap().name.as_str(), u.text.as_str()))
            .collect();
        assert_eq!(
            pair,
            vec![
                ("ANNA", "I mean it's crazy... Sandwiches!"),
                ("HANS", "We finish each"),
            ]
        );
    }

    #[test]
    fn test_dual_heading_resolves_each_name() {
        let mut parser = ScriptParser::new();
        drive(
            &mut parser,
            &[LineKind::DualSpeakerHeading {
                left: "ANNA (CONT'D)",
                right: "ELSA",
            }],
        );
        let names: Vec<_> = parser
            .document()
            .characters()
            .iter()
            .map(|(_, c)| c.name.clone())
            .collect();
        assert_eq!(names, vec!["ANNA", "ELSA"]);

        let open = parser.in_progress();
        assert!(open[0].continued);
        assert!(!open[1].continued);
    }

    #[test]
    fn test_scene_heading_closes_block() {
        let mut parser = ScriptParser::new();
        drive(
            &mut parser,
            &[
                speaker("ELSA"),
                lyric("Let it go."),
                LineKind::SceneHeading {
                    place: "ICE PALACE",
                    time: "NIGHT",
                },
            ],
        );
        assert_eq!(parser.phase(), ParserPhase::Idle);
        assert_eq!(parser.document().len(), 2);
        assert_eq!(
            parser.document().entries()[1],
            Entry::SceneHeading(SceneHeading::new("NIGHT", "ICE PALACE"))
        );
    }

    #[test]
    fn test_malformed_scene_heading_reports_line() {
        let mut parser = ScriptParser::new();
        parser.feed_line("OPEN ON: SOMEWHERE\n").unwrap();
        parser.feed_line("   The wind picks up.\n").unwrap();
        let err = parser.feed_line("   INT. CASTLE HALL\n").unwrap_err();
        match err {
            ParseError::MalformedSceneHeading { line, content } => {
                assert_eq!(line, 3);
                assert_eq!(content, "INT. CASTLE HALL");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_end_of_script_stops_parser() {
        let mut parser = ScriptParser::new();
        drive(&mut parser, &[speaker("ANNA"), lyric("Bye.")]);
        assert_eq!(parser.apply(LineKind::EndOfScript).unwrap(), Flow::Stop);
        assert!(parser.is_finished());
        assert_eq!(parser.document().len(), 1);

        assert_eq!(parser.apply(narration("After the end.")).unwrap(), Flow::Stop);
        assert_eq!(parser.document().len(), 1);
    }

    #[test]
    fn test_ignore_changes_nothing() {
        let mut parser = ScriptParser::new();
        drive(&mut parser, &[speaker("ANNA"), lyric("One")]);
        let before = parser.clone();
        parser.apply(LineKind::Ignore).unwrap();
        assert_eq!(parser.phase(), before.phase());
        assert_eq!(parser.in_progress(), before.in_progress());
    }

    #[test]
    fn test_song_title_while_expecting_adds_nothing() {
        let mut parser = ScriptParser::new();
        drive(&mut parser, &[LineKind::SongTitle, LineKind::SongTitle]);
        assert_eq!(parser.phase(), ParserPhase::ExpectingSongSpeaker);
        assert!(parser.finish().is_empty());
    }
}
