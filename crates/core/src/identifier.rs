//! Actor identifier parsing.
//!
//! Callers address actors either by bare username (`alice`) or by handle
//! (`@alice@srv`). Only handles naming this server resolve; there is no
//! lookup of remote servers.

/// A parsed actor identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identifier<'a> {
    /// Bare local username.
    Local(&'a str),
    /// `@username@server` handle.
    Qualified {
        /// Username part.
        username: &'a str,
        /// Server part.
        server: &'a str,
    },
}

impl<'a> Identifier<'a> {
    /// Parse an identifier.
    ///
    /// Returns `None` for input that starts with `@` but is not exactly
    /// `@username@server`.
    #[must_use]
    pub fn parse(input: &'a str) -> Option<Self> {
        let Some(rest) = input.strip_prefix('@') else {
            return Some(Self::Local(input));
        };

        let parts: Vec<&str> = rest.split('@').collect();
        if parts.len() == 2 {
            return Some(Self::Qualified {
                username: parts[0],
                server: parts[1],
            });
        }

        None
    }

    /// Username this identifier names on `server_name`, if it is local to it.
    #[must_use]
    pub fn username_on(self, server_name: &str) -> Option<&'a str> {
        match self {
            Self::Local(username) => Some(username),
            Self::Qualified { username, server } if server == server_name => Some(username),
            Self::Qualified { .. } => None,
        }
    }
}

/// Format the handle of `username` on `server_name`.
#[must_use]
pub fn format_handle(username: &str, server_name: &str) -> String {
    format!("@{username}@{server_name}")
}
