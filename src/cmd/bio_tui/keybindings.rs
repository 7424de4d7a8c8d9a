//! Static shortcut reference
//!
//! The controller matches keys directly; these tables feed the help overlay,
//! the g-prefix popup and `bio keys`.

use super::state::Route;

pub struct KeyBinding {
    pub keys: &'static [&'static str],
    pub label: &'static str,
}

pub struct HelpSection {
    pub title: &'static str,
    pub prefix: Option<&'static str>,
    pub bindings: &'static [KeyBinding],
}

/// Second key of a `g` chord and where it goes
pub const PREFIX_ROUTES: &[(char, Route)] = &[
    ('h', Route::Home),
    ('l', Route::Links),
    ('b', Route::Blogs),
    ('a', Route::Analytics),
];

pub fn prefix_route(key: char) -> Option<Route> {
    PREFIX_ROUTES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, route)| *route)
}

pub const HELP_SECTIONS: &[HelpSection] = &[
    HelpSection {
        title: "Navigation",
        prefix: Some("g +"),
        bindings: &[
            KeyBinding { keys: &["h"], label: "Home" },
            KeyBinding { keys: &["l"], label: "Links" },
            KeyBinding { keys: &["b"], label: "Blogs" },
            KeyBinding { keys: &["a"], label: "Analytics" },
        ],
    },
    HelpSection {
        title: "Command",
        prefix: None,
        bindings: &[
            KeyBinding { keys: &[":"], label: "Command palette" },
            KeyBinding { keys: &["/"], label: "Search" },
            KeyBinding { keys: &["?"], label: "Show this guide" },
            KeyBinding { keys: &["Esc"], label: "Close / Cancel" },
        ],
    },
    HelpSection {
        title: "Lists",
        prefix: None,
        bindings: &[
            KeyBinding { keys: &["j"], label: "Move down" },
            KeyBinding { keys: &["k"], label: "Move up" },
            KeyBinding { keys: &["Enter"], label: "Open / Select" },
            KeyBinding { keys: &["a", "n"], label: "New" },
            KeyBinding { keys: &["e"], label: "Edit" },
            KeyBinding { keys: &["d"], label: "Delete (y/n confirms)" },
            KeyBinding { keys: &["p"], label: "Publish (blogs)" },
            KeyBinding { keys: &["u"], label: "Unpublish (blogs)" },
        ],
    },
    HelpSection {
        title: "Editor",
        prefix: None,
        bindings: &[
            KeyBinding { keys: &["Ctrl+S"], label: "Save" },
            KeyBinding { keys: &["Tab"], label: "Next field" },
            KeyBinding { keys: &["Esc"], label: "Close" },
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_route_lookup() {
        assert_eq!(prefix_route('h'), Some(Route::Home));
        assert_eq!(prefix_route('a'), Some(Route::Analytics));
        assert_eq!(prefix_route('p'), None);
    }

    #[test]
    fn test_every_route_has_a_chord() {
        for route in Route::ALL {
            assert!(PREFIX_ROUTES.iter().any(|(_, r)| *r == route));
        }
    }
}
