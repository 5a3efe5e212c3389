//! The quote/comment-tracking state machine shared by the span scanner and
//! the field decomposer.

/// Lexer state while sweeping raw text.
///
/// Besides string literals, the machine tracks `//` line comments, nested
/// `/* */` block comments and char literals, so braces, commas, colons and
/// quotes inside any of them are never treated as structure. Char literals
/// are recognized without lookahead: after `'` exactly one (possibly escaped)
/// character is consumed, and a missing closing `'` (a lifetime such as `'a`)
/// falls back to normal lexing — lifetime names never contain structural
/// characters, so nothing is lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LexState {
    Normal,
    /// Saw `/`; the next character decides between comment and plain code.
    MaybeComment,
    LineComment,
    BlockComment { depth: usize },
    /// Saw `*` inside a block comment (possible close).
    BlockStar { depth: usize },
    /// Saw `/` inside a block comment (possible nested open).
    BlockSlash { depth: usize },
    InString,
    Escaped,
    /// Saw `'`; the next character is char content or a lifetime name.
    CharStart,
    /// Saw `\` inside a char literal.
    CharEscape,
    /// Consumed one char of content; a closing `'` ends the literal.
    CharEnd,
}

impl LexState {
    /// Advances the state for one character and reports whether the character
    /// is "structural", i.e. plain code outside strings, chars and comments.
    pub(crate) fn step(&mut self, c: char) -> bool {
        match *self {
            LexState::Normal => self.step_code(c),
            LexState::MaybeComment => match c {
                '/' => {
                    *self = LexState::LineComment;
                    false
                }
                '*' => {
                    *self = LexState::BlockComment { depth: 1 };
                    false
                }
                _ => self.step_code(c),
            },
            LexState::LineComment => {
                if c == '\n' {
                    *self = LexState::Normal;
                }
                false
            }
            LexState::BlockComment { depth } => {
                match c {
                    '*' => *self = LexState::BlockStar { depth },
                    '/' => *self = LexState::BlockSlash { depth },
                    _ => {}
                }
                false
            }
            LexState::BlockStar { depth } => {
                match c {
                    '/' => {
                        *self = if depth == 1 {
                            LexState::Normal
                        } else {
                            LexState::BlockComment { depth: depth - 1 }
                        };
                    }
                    '*' => {}
                    _ => *self = LexState::BlockComment { depth },
                }
                false
            }
            LexState::BlockSlash { depth } => {
                match c {
                    '*' => *self = LexState::BlockComment { depth: depth + 1 },
                    '/' => {}
                    _ => *self = LexState::BlockComment { depth },
                }
                false
            }
            LexState::InString => {
                match c {
                    '"' => *self = LexState::Normal,
                    '\\' => *self = LexState::Escaped,
                    _ => {}
                }
                false
            }
            LexState::Escaped => {
                *self = LexState::InString;
                false
            }
            LexState::CharStart => {
                *self = if c == '\\' {
                    LexState::CharEscape
                } else {
                    LexState::CharEnd
                };
                false
            }
            LexState::CharEscape => {
                *self = LexState::CharEnd;
                false
            }
            LexState::CharEnd => {
                if c == '\'' {
                    *self = LexState::Normal;
                    false
                } else {
                    // It was a lifetime, not a char literal; re-dispatch.
                    self.step_code(c)
                }
            }
        }
    }

    fn step_code(&mut self, c: char) -> bool {
        match c {
            '"' => {
                *self = LexState::InString;
                false
            }
            '\'' => {
                *self = LexState::CharStart;
                false
            }
            '/' => {
                *self = LexState::MaybeComment;
                true
            }
            _ => {
                *self = LexState::Normal;
                true
            }
        }
    }

    pub(crate) fn in_string(self) -> bool {
        matches!(self, LexState::InString | LexState::Escaped)
    }

    /// Plain code: a tag occurrence may start here.
    pub(crate) fn in_code(self) -> bool {
        matches!(self, LexState::Normal | LexState::MaybeComment)
    }

    fn in_comment(self) -> bool {
        matches!(
            self,
            LexState::LineComment
                | LexState::BlockComment { .. }
                | LexState::BlockStar { .. }
                | LexState::BlockSlash { .. }
        )
    }
}

/// `text` with all comment bytes removed; string and char contents are kept.
pub(crate) fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut state = LexState::Normal;

    for c in text.chars() {
        let before = state;
        state.step(c);

        if matches!(before, LexState::MaybeComment) && state.in_comment() {
            // The previous '/' turned out to open a comment.
            out.pop();
            continue;
        }
        if state.in_comment() {
            continue;
        }
        if before.in_comment() && c != '\n' {
            // The '/' that closed a block comment.
            continue;
        }
        out.push(c);
    }

    out
}

/// Byte ranges of the string literals in `text`, quotes included. An
/// unterminated final string extends to end-of-text.
pub fn string_spans(text: &str) -> Vec<std::ops::Range<usize>> {
    let mut spans = Vec::new();
    let mut state = LexState::Normal;
    let mut open = None;

    for (i, c) in text.char_indices() {
        let was_in_string = state.in_string();
        state.step(c);
        match (was_in_string, state.in_string()) {
            (false, true) => open = Some(i),
            (true, false) => {
                if let Some(start) = open.take() {
                    spans.push(start..i + c.len_utf8());
                }
            }
            _ => {}
        }
    }
    if let Some(start) = open {
        spans.push(start..text.len());
    }

    spans
}
