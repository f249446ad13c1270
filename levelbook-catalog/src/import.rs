//! Sharing and importing through the transport collaborators.
//!
//! The share protocol itself is pure (`levelbook-share`). This module wires
//! it to the outside world: a read-once channel that may carry an incoming
//! token, a confirmation prompt guarding the destructive import, and a
//! clipboard-like sink for outgoing links.

use crate::{Catalog, CatalogError};
use levelbook_storage::LevelStore;
use std::fmt;
use tracing::{info, warn};

/// Read-once source of an incoming share token, such as a URL fragment.
pub trait ShareChannel {
    /// Returns the raw token text, if the channel carries one.
    fn read(&self) -> Option<String>;

    /// Empties the channel so a reload does not import again.
    fn clear(&mut self);
}

/// Asks the acting user a yes/no question.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Sink for an outgoing share link.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), String>;
}

/// A [`ShareChannel`] over an in-memory URL fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentChannel {
    fragment: Option<String>,
}

impl FragmentChannel {
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            fragment: Some(fragment.into()),
        }
    }

    /// Takes the fragment of a full URL, if it has a non-empty one.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        Self {
            fragment: url.split_once('#').map(|(_, f)| f.to_string()),
        }
    }

    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }
}

impl ShareChannel for FragmentChannel {
    fn read(&self) -> Option<String> {
        self.fragment
            .as_deref()
            .map(|f| f.strip_prefix('#').unwrap_or(f))
            .filter(|f| !f.trim().is_empty())
            .map(String::from)
    }

    fn clear(&mut self) {
        self.fragment = None;
    }
}

/// Transient user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Imported,
    ImportRejected,
    ShareCopied,
    ShareCopyFailed,
    NothingToShare,
    SaveFailed,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Imported => "Levels imported successfully!",
            Self::ImportRejected => "Invalid shared data",
            Self::ShareCopied => "Share link copied to clipboard!",
            Self::ShareCopyFailed => "Failed to copy link",
            Self::NothingToShare => "No levels to share!",
            Self::SaveFailed => "Failed to save levels",
        })
    }
}

/// What happened when the share channel was checked.
#[derive(Debug)]
pub enum ImportOutcome {
    /// The channel carried no token.
    NoToken,
    /// The store was replaced with this many levels.
    Imported(usize),
    /// The user declined to replace the store with this many levels.
    Declined(usize),
    /// The token was unusable; the store is unchanged.
    Rejected(CatalogError),
}

impl ImportOutcome {
    /// The message to show the user, if any.
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::NoToken | Self::Declined(_) => None,
            Self::Imported(_) => Some(Notice::Imported),
            Self::Rejected(_) => Some(Notice::ImportRejected),
        }
    }
}

/// Prompt shown before a destructive import of `count` levels.
#[must_use]
pub fn import_prompt(count: usize) -> String {
    format!("Import {count} shared levels? This will replace your current list.")
}

/// Imports a shared collection from `channel` after explicit confirmation.
///
/// The channel is cleared whenever it carried a token, whether the import
/// succeeded, was declined, or failed.
pub fn import_shared<S, C, K>(
    catalog: &mut Catalog<S>,
    channel: &mut C,
    confirm: &mut K,
) -> ImportOutcome
where
    S: LevelStore,
    C: ShareChannel + ?Sized,
    K: Confirm + ?Sized,
{
    let Some(token) = channel.read() else {
        return ImportOutcome::NoToken;
    };
    let decoded = levelbook_share::decode(&token);
    channel.clear();

    let levels = match decoded {
        Ok(levels) => levels,
        Err(e) => {
            warn!("ignoring invalid shared data: {e}");
            return ImportOutcome::Rejected(e.into());
        }
    };

    let count = levels.len();
    if !confirm.confirm(&import_prompt(count)) {
        info!("import of {count} shared levels declined");
        return ImportOutcome::Declined(count);
    }

    match catalog.replace_all(levels) {
        Ok(n) => ImportOutcome::Imported(n),
        Err(e) => {
            warn!("shared levels rejected: {e}");
            ImportOutcome::Rejected(e)
        }
    }
}

/// Encodes the catalog into a share link and writes it to `clipboard`.
///
/// Returns the notice to show, and the link whenever one was built.
pub fn share_list<S, B>(
    catalog: &Catalog<S>,
    base_url: &str,
    clipboard: &mut B,
) -> (Notice, Option<String>)
where
    S: LevelStore,
    B: Clipboard + ?Sized,
{
    let token = match catalog.share_token() {
        Ok(token) => token,
        Err(_) => return (Notice::NothingToShare, None),
    };
    let url = levelbook_share::share_url(base_url, &token);
    match clipboard.write_text(&url) {
        Ok(()) => (Notice::ShareCopied, Some(url)),
        Err(e) => {
            warn!("failed to copy share link: {e}");
            (Notice::ShareCopyFailed, Some(url))
        }
    }
}
