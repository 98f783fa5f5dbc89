use inksac::prelude::*;

use crate::path::home_dir;

const COLOR_TERMS: [&str; 4] = ["xterm", "linux", "vt100", "color"];

/// Whether a `TERM` value names a terminal that understands ANSI colors.
pub fn term_supports_color(term: Option<&str>) -> bool {
    term.is_some_and(|term| COLOR_TERMS.iter().any(|known| term.contains(known)))
}

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    enabled: bool,
}

impl Theme {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// `user@husk:dir$ `, with the home directory shown as `~`.
    pub fn prompt(&self, user: &str, current_dir: &str) -> String {
        let dir = shorten_home(current_dir);
        if !self.enabled {
            return format!("{}@husk:{}$ ", user, dir);
        }

        let user_style = Style::builder().foreground(Color::Green).bold().build();
        let dir_style = Style::builder().foreground(Color::Cyan).bold().build();
        format!(
            "{}@husk:{}$ ",
            user.style(user_style),
            dir.as_str().style(dir_style)
        )
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if !self.enabled {
            return error.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        error.style(error_style).to_string()
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if !self.enabled {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();
        hint.style(hint_style).to_string()
    }
}

fn shorten_home(dir: &str) -> String {
    let home = home_dir().map(|home| home.to_string_lossy().into_owned());
    match home {
        Some(home) if !home.is_empty() && home != "/" => match dir.strip_prefix(&home) {
            Some("") => "~".to_string(),
            Some(rest) if rest.starts_with('/') => format!("~{}", rest),
            _ => dir.to_string(),
        },
        _ => dir.to_string(),
    }
}
