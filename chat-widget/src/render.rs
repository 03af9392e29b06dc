//! Terminal rendering of transcript turns.
//!
//! [`Bubble`] is the plain view model (what is shown); [`Bubble::paint`] adds
//! colors. User bubbles are right-aligned, assistant bubbles left-aligned.

use colored::Colorize;

use crate::{transcript::Turn, widget::ChatWidget};

/// Summary line of the sources disclosure.
pub const SOURCES_SUMMARY: &str = "Sources";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    User,
    Assistant,
    Error,
}

/// Disclosure section under an assistant answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourcesView {
    Collapsed { count: usize },
    Expanded { labels: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bubble {
    pub index: usize,
    pub align: Align,
    pub tone: Tone,
    pub body: Vec<String>,
    pub sources: Option<SourcesView>,
}

impl Bubble {
    /// Builds the view of `turn` at `index`; `expanded` opens its sources.
    pub fn new(index: usize, turn: &Turn, expanded: bool) -> Self {
        let (align, tone) = match turn {
            Turn::User { .. } => (Align::Right, Tone::User),
            Turn::Assistant { failed: true, .. } => (Align::Left, Tone::Error),
            Turn::Assistant { .. } => (Align::Left, Tone::Assistant),
        };

        let citations = turn.citations();
        let sources = (!citations.is_empty()).then(|| {
            if expanded {
                SourcesView::Expanded {
                    labels: citations.iter().map(|c| c.label().to_string()).collect(),
                }
            } else {
                SourcesView::Collapsed {
                    count: citations.len(),
                }
            }
        });

        Self {
            index,
            align,
            tone,
            body: turn.content().lines().map(str::to_string).collect(),
            sources,
        }
    }

    fn header(&self) -> String {
        match self.tone {
            Tone::User => format!("you #{}", self.index),
            Tone::Assistant => format!("assistant #{}", self.index),
            Tone::Error => format!("assistant #{} · error", self.index),
        }
    }

    /// Uncolored lines, aligned within `width` columns.
    pub fn lines(&self, width: usize) -> Vec<String> {
        let mut out = vec![self.header()];
        out.extend(self.body.iter().cloned());

        match &self.sources {
            Some(SourcesView::Collapsed { count }) => {
                out.push(format!("▸ {SOURCES_SUMMARY} ({count})"));
            }
            Some(SourcesView::Expanded { labels }) => {
                out.push(format!("▾ {SOURCES_SUMMARY}"));
                out.extend(labels.iter().map(|l| format!("  • {l}")));
            }
            None => {}
        }

        match self.align {
            Align::Left => out,
            Align::Right => out.into_iter().map(|l| format!("{l:>width$}")).collect(),
        }
    }

    /// Colored rendering for a terminal.
    pub fn paint(&self, width: usize) -> String {
        let lines = self.lines(width);
        let mut painted = Vec::with_capacity(lines.len());
        for (i, line) in lines.iter().enumerate() {
            let styled = match (i, self.tone) {
                (0, Tone::User) => line.blue().bold(),
                (0, Tone::Assistant) => line.green().bold(),
                (0, Tone::Error) => line.red().bold(),
                (_, Tone::Error) => line.red(),
                (i, _) if i > self.body.len() => line.dimmed(),
                _ => line.normal(),
            };
            painted.push(styled.to_string());
        }
        painted.join("\n")
    }
}

/// View of the widget's turn at `index`, honoring its disclosure state.
pub fn bubble_at(widget: &ChatWidget, index: usize) -> Option<Bubble> {
    widget
        .transcript()
        .get(index)
        .map(|turn| Bubble::new(index, turn, widget.is_expanded(index)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Citation;

    fn assistant(chunks: Vec<Citation>) -> Turn {
        Turn::Assistant {
            content: "See the report.".into(),
            citations: chunks,
            failed: false,
        }
    }

    #[test]
    fn source_label_is_shown_when_expanded() {
        let turn = assistant(vec![Citation {
            id: Some("c1".into()),
            source: Some("report.pdf".into()),
        }]);

        let collapsed = Bubble::new(1, &turn, false);
        assert_eq!(collapsed.sources, Some(SourcesView::Collapsed { count: 1 }));
        assert!(!collapsed.lines(40).iter().any(|l| l.contains("report.pdf")));

        let open = Bubble::new(1, &turn, true);
        assert_eq!(
            open.lines(40),
            ["assistant #1", "See the report.", "▾ Sources", "  • report.pdf"]
        );
    }

    #[test]
    fn id_is_the_fallback_label() {
        let turn = assistant(vec![Citation {
            id: Some("c1".into()),
            source: None,
        }]);
        let open = Bubble::new(1, &turn, true);
        assert_eq!(
            open.sources,
            Some(SourcesView::Expanded {
                labels: vec!["c1".into()]
            })
        );
    }

    #[test]
    fn uncited_and_user_turns_have_no_disclosure() {
        assert_eq!(Bubble::new(1, &assistant(Vec::new()), true).sources, None);

        let user = Bubble::new(0, &Turn::User { content: "hi".into() }, false);
        assert_eq!(user.align, Align::Right);
        assert_eq!(user.lines(10), ["    you #0", "        hi"]);
    }

    #[test]
    fn failed_turns_are_error_toned_and_keep_line_breaks() {
        let turn = Turn::Assistant {
            content: "Error: boom\nsecond line".into(),
            citations: Vec::new(),
            failed: true,
        };
        let b = Bubble::new(3, &turn, false);
        assert_eq!(b.tone, Tone::Error);
        assert_eq!(b.lines(80), ["assistant #3 · error", "Error: boom", "second line"]);
    }
}
