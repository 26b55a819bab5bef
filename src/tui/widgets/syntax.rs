//! Ruby snippet → ratatui Lines via syntect.
//!
//! Highlighting is decoration: any failure (unknown syntax, highlighter
//! error) falls back to plain text and is never surfaced.

use std::sync::OnceLock;

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme_set() -> &'static ThemeSet {
    THEME_SET.get_or_init(ThemeSet::load_defaults)
}

fn theme_name(dark: bool) -> &'static str {
    if dark {
        "base16-ocean.dark"
    } else {
        "InspiredGitHub"
    }
}

/// Highlight a Ruby snippet into owned ratatui lines.
///
/// One output line per input line; `dark` selects the highlight theme to
/// match the active UI palette.
pub fn highlight_ruby(code: &str, dark: bool) -> Vec<Line<'static>> {
    let ss = syntax_set();
    let Some(syntax) = ss.find_syntax_by_token("rb") else {
        return plain_lines(code);
    };
    let Some(theme) = theme_set().themes.get(theme_name(dark)) else {
        return plain_lines(code);
    };

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut lines: Vec<Line<'static>> = Vec::new();

    for line_str in LinesWithEndings::from(code) {
        match highlighter.highlight_line(line_str, ss) {
            Ok(ranges) => {
                let spans: Vec<Span<'static>> = ranges
                    .into_iter()
                    .map(|(style, text)| {
                        let fg = style.foreground;
                        Span::styled(
                            text.trim_end_matches('\n').to_string(),
                            Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b)),
                        )
                    })
                    .collect();
                lines.push(Line::from(spans));
            }
            Err(_) => {
                lines.push(Line::raw(line_str.trim_end_matches('\n').to_string()));
            }
        }
    }

    lines
}

fn plain_lines(code: &str) -> Vec<Line<'static>> {
    code.lines().map(|l| Line::raw(l.to_string())).collect()
}
