//! State types for bio_tui
//!
//! Small value types shared by the bus, the views and the renderer.

use eyre::{Result, bail};
use std::str::FromStr;
use std::time::{Duration, Instant};

// Input mode

/// Input mode of the keyboard bus. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// `g` was pressed, waiting for the second key of a navigation chord
    GPrefix,
    /// The command palette owns the keyboard
    Command,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::GPrefix => "g-",
            Mode::Command => "COMMAND",
        }
    }
}

// Routes

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Links,
    Blogs,
    Analytics,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Home, Route::Links, Route::Blogs, Route::Analytics];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Links => "/links",
            Route::Blogs => "/blogs",
            Route::Analytics => "/analytics",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Links => "links",
            Route::Blogs => "blogs",
            Route::Analytics => "analytics",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl FromStr for Route {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        let path = s.trim();
        match path {
            "/" | "" => Ok(Route::Home),
            "/links" | "links" => Ok(Route::Links),
            "/blogs" | "blogs" => Ok(Route::Blogs),
            "/analytics" | "analytics" => Ok(Route::Analytics),
            other => bail!("unknown route: {other}"),
        }
    }
}

// Key routing

/// What currently owns keyboard focus, as reported by the shell on each key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Shortcuts,
    TextInput,
}

/// Whether a dispatched key should still reach the focused text field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Consumed by the bus
    Stop,
    /// Forward to the focused text field, if any
    Continue,
}

// Status message types

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: MessageKind,
    pub expires: Instant,
}

impl StatusMessage {
    pub fn new(text: String, kind: MessageKind) -> Self {
        Self {
            text,
            kind,
            expires: Instant::now() + Duration::from_secs(3),
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() > self.expires
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths_parse_back() {
        for route in Route::ALL {
            assert_eq!(route.path().parse::<Route>().unwrap(), route);
        }
        assert_eq!("blogs".parse::<Route>().unwrap(), Route::Blogs);
        assert!("/settings".parse::<Route>().is_err());
    }

    #[test]
    fn test_mode_defaults_to_normal() {
        assert_eq!(Mode::default(), Mode::Normal);
        assert_eq!(Mode::GPrefix.label(), "g-");
    }
}
