//! Services the core consumes but does not implement.
//!
//! The CLI provides real implementations; tests use closures or fakes.

use crate::error::ShareCalResult;

/// A yes/no question put to the user before something destructive
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// System clipboard
pub trait Clipboard {
    fn write_text(&self, text: &str) -> ShareCalResult<()>;
}

/// Default mail client, opened on a `mailto:` URL
pub trait MailClient {
    fn open_draft(&self, mailto: &str) -> ShareCalResult<()>;
}
