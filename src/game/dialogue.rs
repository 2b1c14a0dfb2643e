//! Dialogue System
//!
//! Scripted conversations opened by clicking a character, plus short
//! transient messages for guard waves and gate toggles. At most one session
//! is active at a time; transient messages never disturb an open session.

use log::debug;

use crate::game::scheduler::{Scheduler, TimerId};

/// Seconds before a transient message auto-dismisses.
pub const TRANSIENT_DURATION: f32 = 1.5;

/// Seconds per revealed character in the typewriter effect.
pub const TYPEWRITER_CHAR_DELAY: f32 = 0.03;

/// Fixed scripts, one per named character.
const SCRIPTS: &[(&str, &[&str])] = &[
    (
        "King",
        &[
            "Welcome to the castle fair, traveler!",
            "My guards keep watch on the walls day and night.",
            "The cannons? Purely ceremonial, I assure you.",
            "Do try the balloon game - the whole court plays it.",
        ],
    ),
    (
        "Queen",
        &[
            "The horses are restless today.",
            "Have you seen the banners from the east tower?",
            "Mind the drawbridge, it has a temper.",
        ],
    ),
    (
        "Blacksmith",
        &[
            "Every cannonball on that wall passed my forge.",
            "A guard dulls a blade faster than any battle.",
            "If the gate jams again, come fetch me.",
        ],
    ),
];

/// Fixed script lookup. Unknown speakers get `None` and no session opens.
/// Returns the canonical `'static` name alongside the lines.
pub fn script_for(speaker: &str) -> Option<(&'static str, &'static [&'static str])> {
    SCRIPTS
        .iter()
        .find(|(name, _)| *name == speaker)
        .map(|&(name, lines)| (name, lines))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DialogueEvent {
    DismissTransient,
}

/// One scripted conversation in progress.
#[derive(Debug, Clone)]
pub struct DialogueSession {
    speaker: &'static str,
    lines: &'static [&'static str],
    index: usize,
    /// Characters revealed of the current line, accumulated by update().
    revealed: f32,
}

impl DialogueSession {
    pub fn speaker(&self) -> &'static str {
        self.speaker
    }

    pub fn line_index(&self) -> usize {
        self.index
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn current_line(&self) -> &'static str {
        self.lines[self.index]
    }

    /// The visible prefix of the current line under the typewriter reveal.
    pub fn revealed_text(&self) -> &'static str {
        let line = self.current_line();
        let shown = (self.revealed as usize).min(line.len());
        &line[..shown]
    }

    pub fn line_fully_revealed(&self) -> bool {
        self.revealed as usize >= self.current_line().len()
    }
}

/// Result of an advance (click while a session is open).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved on to the next scripted line.
    NextLine,
    /// The script was exhausted; the session closed. Carries the speaker so
    /// the caller can restore that character's highlight.
    Closed(&'static str),
}

/// Owns the active session and the transient message channel.
pub struct DialogueSystem {
    session: Option<DialogueSession>,
    transient: Option<String>,
    scheduler: Scheduler<DialogueEvent>,
    transient_timer: Option<TimerId>,
}

impl DialogueSystem {
    pub fn new() -> Self {
        Self {
            session: None,
            transient: None,
            scheduler: Scheduler::new(),
            transient_timer: None,
        }
    }

    /// Open a session for `speaker`. Unknown names are a silent no-op; an
    /// already-active session is left untouched. Returns the speaker name on
    /// success so the caller can highlight the character.
    pub fn open(&mut self, speaker: &str) -> Option<&'static str> {
        if self.session.is_some() {
            return None;
        }
        let Some((speaker, lines)) = script_for(speaker) else {
            debug!("no script for speaker '{speaker}', ignoring");
            return None;
        };
        self.session = Some(DialogueSession {
            speaker,
            lines,
            index: 0,
            revealed: 0.0,
        });
        Some(speaker)
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DialogueSession> {
        self.session.as_ref()
    }

    pub fn transient(&self) -> Option<&str> {
        self.transient.as_deref()
    }

    /// Advance to the next line, closing the session after the last one.
    /// Advancing mid-reveal abandons the rest of the current line.
    pub fn advance(&mut self) -> Option<AdvanceOutcome> {
        let session = self.session.as_mut()?;
        if session.index + 1 < session.lines.len() {
            session.index += 1;
            session.revealed = 0.0;
            Some(AdvanceOutcome::NextLine)
        } else {
            let speaker = session.speaker;
            self.session = None;
            Some(AdvanceOutcome::Closed(speaker))
        }
    }

    /// Close immediately (escape key). Returns the speaker whose highlight
    /// must be restored, if a session was open.
    pub fn close(&mut self) -> Option<&'static str> {
        self.session.take().map(|s| s.speaker)
    }

    /// Show a transient message, replacing any current one and re-arming the
    /// dismissal timer. The active session, if any, is not affected.
    pub fn show_transient(&mut self, text: impl Into<String>) {
        if let Some(id) = self.transient_timer.take() {
            self.scheduler.cancel(id);
        }
        self.transient = Some(text.into());
        self.transient_timer = Some(
            self.scheduler
                .after(TRANSIENT_DURATION, DialogueEvent::DismissTransient),
        );
    }

    /// Per-frame update: typewriter reveal and transient expiry.
    pub fn update(&mut self, delta: f32) {
        if let Some(session) = self.session.as_mut() {
            if !session.line_fully_revealed() {
                session.revealed += delta / TYPEWRITER_CHAR_DELAY;
            }
        }

        for event in self.scheduler.advance(delta) {
            match event {
                DialogueEvent::DismissTransient => {
                    self.transient = None;
                    self.transient_timer = None;
                }
            }
        }
    }
}

impl Default for DialogueSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_king_script_has_four_lines() {
        let (name, lines) = script_for("King").unwrap();
        assert_eq!(name, "King");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_unknown_speaker_is_noop() {
        let mut dialogue = DialogueSystem::new();
        assert_eq!(dialogue.open("Jester"), None);
        assert!(!dialogue.is_active());
    }

    #[test]
    fn test_open_then_four_advances_closes_king() {
        let mut dialogue = DialogueSystem::new();
        assert_eq!(dialogue.open("King"), Some("King"));
        assert!(dialogue.is_active());

        assert_eq!(dialogue.advance(), Some(AdvanceOutcome::NextLine));
        assert_eq!(dialogue.advance(), Some(AdvanceOutcome::NextLine));
        assert_eq!(dialogue.advance(), Some(AdvanceOutcome::NextLine));
        assert_eq!(dialogue.advance(), Some(AdvanceOutcome::Closed("King")));
        assert!(!dialogue.is_active());
    }

    #[test]
    fn test_second_open_while_active_is_ignored() {
        let mut dialogue = DialogueSystem::new();
        dialogue.open("King");
        assert_eq!(dialogue.open("Queen"), None);
        assert_eq!(dialogue.session().unwrap().speaker(), "King");
    }

    #[test]
    fn test_typewriter_reveals_over_time() {
        let mut dialogue = DialogueSystem::new();
        dialogue.open("King");

        assert_eq!(dialogue.session().unwrap().revealed_text(), "");
        dialogue.update(TYPEWRITER_CHAR_DELAY * 7.0);
        let shown = dialogue.session().unwrap().revealed_text();
        assert_eq!(shown.len(), 7);

        // A long update completes the line without overrunning
        dialogue.update(10.0);
        assert!(dialogue.session().unwrap().line_fully_revealed());
    }

    #[test]
    fn test_transient_auto_dismisses() {
        let mut dialogue = DialogueSystem::new();
        dialogue.show_transient("The guard waves back!");
        assert_eq!(dialogue.transient(), Some("The guard waves back!"));

        dialogue.update(TRANSIENT_DURATION - 0.1);
        assert!(dialogue.transient().is_some());
        dialogue.update(0.2);
        assert!(dialogue.transient().is_none());
    }

    #[test]
    fn test_transient_does_not_disturb_session() {
        let mut dialogue = DialogueSystem::new();
        dialogue.open("Queen");
        dialogue.advance();

        dialogue.show_transient("The gate creaks open.");
        dialogue.update(TRANSIENT_DURATION + 0.1);

        let session = dialogue.session().unwrap();
        assert_eq!(session.speaker(), "Queen");
        assert_eq!(session.line_index(), 1);
    }

    #[test]
    fn test_replacing_transient_rearms_timer() {
        let mut dialogue = DialogueSystem::new();
        dialogue.show_transient("first");
        dialogue.update(1.0);
        dialogue.show_transient("second");

        // The first timer would have fired here; the second must survive
        dialogue.update(0.7);
        assert_eq!(dialogue.transient(), Some("second"));
        dialogue.update(1.0);
        assert!(dialogue.transient().is_none());
    }

    #[test]
    fn test_escape_close_returns_speaker() {
        let mut dialogue = DialogueSystem::new();
        dialogue.open("Blacksmith");
        assert_eq!(dialogue.close(), Some("Blacksmith"));
        assert!(!dialogue.is_active());
        assert_eq!(dialogue.close(), None);
    }
}
