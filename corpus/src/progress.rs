//! Terminal progress reporting for the long-running loops.

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{CorpusError, Result};

/// Creates a bar over `len` items, or a hidden one when `visible` is false.
pub(crate) fn bar(len: u64, message: &str, visible: bool) -> Result<ProgressBar> {
    if !visible {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} {msg} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})")
        .map_err(|e| CorpusError::Progress(e.to_string()))?
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    Ok(pb)
}

/// Creates a spinner counting items of unknown total.
pub(crate) fn spinner(message: &str, visible: bool) -> Result<ProgressBar> {
    if !visible {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg} {pos} [{elapsed_precise}]")
        .map_err(|e| CorpusError::Progress(e.to_string()))?;
    pb.set_style(style);
    pb.set_message(message.to_string());
    Ok(pb)
}
