use std::io::Write;

use async_trait::async_trait;
use press_core::collaborators::Clipboard;
use press_core::errors::CollaboratorError;

const BEGIN_MARKER: &str = "----- BEGIN CLIPBOARD -----";
const END_MARKER: &str = "----- END CLIPBOARD -----";

/// Terminal stand-in for a system clipboard: prints the text between markers.
pub struct StdoutClipboard;

fn framed(text: &str) -> String {
    format!("{BEGIN_MARKER}\n{text}\n{END_MARKER}")
}

#[async_trait]
impl Clipboard for StdoutClipboard {
    async fn write(&self, text: &str) -> Result<(), CollaboratorError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", framed(text))
            .and_then(|()| stdout.flush())
            .map_err(|error| CollaboratorError::upstream("clipboard", error.to_string()))
    }
}
