//! Desktop implementations of the core's ports.

use std::io::Write;
use std::process::{Command, Stdio};

use dialoguer::Confirm as ConfirmPrompt;
use sharecal_core::ports::{Clipboard, Confirm, MailClient};
use sharecal_core::{ShareCalError, ShareCalResult};

/// Asks on the terminal. A failed prompt (e.g. no tty) counts as "no".
pub struct DialogConfirm;

impl Confirm for DialogConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        ConfirmPrompt::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

/// Clipboard tools tried in order, with the arguments that make them read stdin
const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip", &[]),
];

/// Pipes text into the first clipboard tool found on PATH
pub struct CommandClipboard;

impl Clipboard for CommandClipboard {
    fn write_text(&self, text: &str) -> ShareCalResult<()> {
        let (tool, args) = CLIPBOARD_TOOLS
            .iter()
            .find_map(|(name, args)| which::which(name).ok().map(|path| (path, *args)))
            .ok_or_else(|| ShareCalError::Clipboard("No clipboard tool found".to_string()))?;

        tracing::debug!(tool = %tool.display(), "copying to clipboard");

        let mut child = Command::new(&tool)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ShareCalError::Clipboard(format!("{}: {e}", tool.display())))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| ShareCalError::Clipboard(e.to_string()))?;
        }

        let status = child
            .wait()
            .map_err(|e| ShareCalError::Clipboard(e.to_string()))?;
        if !status.success() {
            return Err(ShareCalError::Clipboard(format!(
                "{} exited with {}",
                tool.display(),
                status
            )));
        }

        Ok(())
    }
}

/// Hands `mailto:` URLs to the system's default handler
pub struct OpenMailClient;

impl MailClient for OpenMailClient {
    fn open_draft(&self, mailto: &str) -> ShareCalResult<()> {
        open::that(mailto).map_err(|e| ShareCalError::MailClient(e.to_string()))
    }
}
