use eframe::egui;
use serde::{Deserialize, Serialize};

/// Shortcut as the host describes it on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostLink {
    pub app_name: String,
    pub link_path: String, // Opaque launch target, only the host interprets it
    pub shortcut_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutEntry {
    pub app_name: String,
    pub link_path: String,
    pub shortcut_key: char,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    NotSingleCharacter,
    /// No key on the keyboard reports this character when released.
    Unreachable,
}

/// A host link that cannot be turned into a [`ShortcutEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidLink {
    pub app_name: String,
    pub shortcut_text: String,
    pub reason: InvalidReason,
}

impl std::fmt::Display for InvalidLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let problem = match self.reason {
            InvalidReason::NotSingleCharacter => "is not a single character",
            InvalidReason::Unreachable => "cannot be typed as a single key",
        };
        write!(f, "shortcut '{}' for '{}' {}", self.shortcut_text, self.app_name, problem)
    }
}

impl std::error::Error for InvalidLink {}

impl ShortcutEntry {
    pub fn new(app_name: impl Into<String>, link_path: impl Into<String>, shortcut_key: char) -> Self {
        Self {
            app_name: app_name.into(),
            link_path: link_path.into(),
            shortcut_key,
        }
    }

    /// Text shown on the entry's button.
    pub fn label(&self) -> String {
        self.shortcut_key.to_uppercase().collect()
    }

    /// Case-insensitive comparison of a key name against this entry's accelerator.
    pub fn matches(&self, key: &str) -> bool {
        key.to_uppercase() == self.label()
    }
}

/// Whether releasing some key reports `key` (ignoring case). Key releases
/// carry the key's name, so shifted symbols such as `!` never arrive.
pub fn is_reachable(key: char) -> bool {
    let wanted: String = key.to_uppercase().collect();
    egui::Key::ALL
        .iter()
        .any(|k| k.symbol_or_name().to_uppercase() == wanted)
}

impl TryFrom<HostLink> for ShortcutEntry {
    type Error = InvalidLink;

    fn try_from(link: HostLink) -> Result<Self, Self::Error> {
        let mut chars = link.shortcut_text.trim().chars();
        let reason = match (chars.next(), chars.next()) {
            (Some(key), None) if is_reachable(key) => {
                return Ok(ShortcutEntry {
                    app_name: link.app_name,
                    link_path: link.link_path,
                    shortcut_key: key,
                })
            }
            (Some(_), None) => InvalidReason::Unreachable,
            _ => InvalidReason::NotSingleCharacter,
        };
        Err(InvalidLink {
            app_name: link.app_name,
            shortcut_text: link.shortcut_text,
            reason,
        })
    }
}

/// Convert a full host snapshot. A single bad link rejects the whole list.
pub fn entries_from_host(links: Vec<HostLink>) -> Result<Vec<ShortcutEntry>, InvalidLink> {
    links
        .into_iter()
        .map(ShortcutEntry::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            tracing::warn!(app = %e.app_name, shortcut = %e.shortcut_text, "rejected host link: {e}");
            e
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(app: &str, path: &str, key: &str) -> HostLink {
        HostLink {
            app_name: app.into(),
            link_path: path.into(),
            shortcut_text: key.into(),
        }
    }

    #[test]
    fn host_link_uses_camel_case_fields() {
        let parsed: HostLink = serde_json::from_str(
            r#"{"appName":"Notes","linkPath":"/Apps/Notes.app","shortcutText":"N"}"#,
        )
        .unwrap();
        assert_eq!(parsed, link("Notes", "/Apps/Notes.app", "N"));
    }

    #[test]
    fn single_character_text_becomes_entry() {
        let entry = ShortcutEntry::try_from(link("Notes", "/Apps/Notes.app", " n ")).unwrap();
        assert_eq!(entry.shortcut_key, 'n');
        assert_eq!(entry.label(), "N");
    }

    #[test]
    fn empty_or_long_text_is_rejected() {
        let err = ShortcutEntry::try_from(link("a", "b", "")).unwrap_err();
        assert_eq!(err.reason, InvalidReason::NotSingleCharacter);
        assert!(ShortcutEntry::try_from(link("a", "b", "AB")).is_err());
        let err = entries_from_host(vec![link("a", "b", "A"), link("c", "d", "  ")]).unwrap_err();
        assert_eq!(err.app_name, "c");
    }

    #[test]
    fn shifted_symbols_are_rejected() {
        let err = ShortcutEntry::try_from(link("Shout", "/Apps/Shout.app", "!")).unwrap_err();
        assert_eq!(err.reason, InvalidReason::Unreachable);
        assert!(err.to_string().contains("cannot be typed"));

        let err = entries_from_host(vec![link("Notes", "/n", "N"), link("Shout", "/s", "!")]).unwrap_err();
        assert_eq!(err.app_name, "Shout");
    }

    #[test]
    fn every_accepted_key_has_a_key_that_fires_it() {
        for key in ['a', 'Z', '7'] {
            assert!(is_reachable(key), "{key} should be reachable");
        }
        for key in egui::Key::ALL {
            let name = key.symbol_or_name();
            let mut chars = name.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                let entry = ShortcutEntry::try_from(link("App", "/app", name)).unwrap();
                assert!(entry.matches(name), "{name} should match its own key");
                assert!(is_reachable(c));
            }
        }
    }

    #[test]
    fn matching_ignores_case() {
        let entry = ShortcutEntry::new("Notes", "/Apps/Notes.app", 'N');
        assert!(entry.matches("n"));
        assert!(entry.matches("N"));
        assert!(!entry.matches("M"));
        assert!(!entry.matches("Enter"));
    }
}
