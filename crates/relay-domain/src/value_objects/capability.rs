//! Capability kinds
//!
//! A capability names the kind of operation a call performs. Providers expose
//! one handler per capability they support.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of operation a call performs
///
/// The well-known kinds are associated constants. Providers may define their
/// own with [`Capability::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(Cow<'static, str>);

impl Capability {
    /// Chat/text completion
    pub const COMPLETION: Self = Self(Cow::Borrowed("completion"));
    /// Vector embeddings
    pub const EMBEDDING: Self = Self(Cow::Borrowed("embedding"));
    /// Image generation
    pub const IMAGE_GENERATION: Self = Self(Cow::Borrowed("image_generation"));
    /// Text to speech
    pub const SPEECH: Self = Self(Cow::Borrowed("speech"));
    /// Speech to text
    pub const TRANSCRIPTION: Self = Self(Cow::Borrowed("transcription"));
    /// Stateful responses API: create a response
    pub const RESPONSE: Self = Self(Cow::Borrowed("response"));
    /// Fetch a stored response
    pub const RESPONSE_RETRIEVE: Self = Self(Cow::Borrowed("response.retrieve"));
    /// Cancel a background response
    pub const RESPONSE_CANCEL: Self = Self(Cow::Borrowed("response.cancel"));
    /// Delete a stored response
    pub const RESPONSE_DELETE: Self = Self(Cow::Borrowed("response.delete"));
    /// Compact a conversation
    pub const RESPONSE_COMPACT: Self = Self(Cow::Borrowed("response.compact"));
    /// List the input items of a stored response
    pub const RESPONSE_INPUT_ITEMS: Self = Self(Cow::Borrowed("response.input_items"));

    /// Create a custom capability kind
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Capability name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Capability {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
