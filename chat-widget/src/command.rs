/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text: becomes the draft (blank keeps the current draft) and
    /// submits it. Lines starting with an unknown `:word` are text too, and
    /// `::` escapes a leading colon.
    Ask(String),
    /// `:sources N` toggles the disclosure of turn N.
    ToggleSources(usize),
    /// `:quit` or `:q`.
    Quit,
    /// `:sources` without a valid turn number.
    Usage(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let text = line.trim_end_matches(['\r', '\n']);
        let trimmed = text.trim();

        if let Some(escaped) = trimmed.strip_prefix("::") {
            return Command::Ask(format!(":{escaped}"));
        }
        let Some(rest) = trimmed.strip_prefix(':') else {
            return Command::Ask(text.to_string());
        };

        let mut parts = rest.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some("quit" | "q"), None, _) => Command::Quit,
            (Some("sources" | "s"), Some(n), None) => n
                .parse()
                .map(Command::ToggleSources)
                .unwrap_or_else(|_| Command::Usage(trimmed.to_string())),
            (Some("sources" | "s"), _, _) => Command::Usage(trimmed.to_string()),
            _ => Command::Ask(text.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_and_questions() {
        assert_eq!(Command::parse(":quit"), Command::Quit);
        assert_eq!(Command::parse(" :q "), Command::Quit);
        assert_eq!(Command::parse(":sources 3"), Command::ToggleSources(3));
        assert_eq!(Command::parse(":s 1"), Command::ToggleSources(1));
        assert_eq!(Command::parse(":sources x"), Command::Usage(":sources x".into()));
        assert_eq!(Command::parse(":sources"), Command::Usage(":sources".into()));
        assert_eq!(Command::parse("What is DMA?\r"), Command::Ask("What is DMA?".into()));
        assert_eq!(Command::parse(""), Command::Ask(String::new()));
    }

    #[test]
    fn colon_led_questions_are_still_asked() {
        assert_eq!(Command::parse(":) what is DMA?"), Command::Ask(":) what is DMA?".into()));
        assert_eq!(Command::parse(":help"), Command::Ask(":help".into()));
        assert_eq!(Command::parse(":quit now"), Command::Ask(":quit now".into()));
        assert_eq!(Command::parse("::sources 2"), Command::Ask(":sources 2".into()));
        assert_eq!(Command::parse("::q"), Command::Ask(":q".into()));
    }
}
