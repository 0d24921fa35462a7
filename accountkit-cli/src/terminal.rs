use std::{
    io::{self, BufRead, Stdout, StdinLock, Write},
    sync::atomic::{AtomicBool, Ordering},
};

use accountkit_core::{DeleteAccountView, ModalHost};
use eyre::{Result, WrapErr};

/// Presents modal side effects on the terminal.
#[derive(Default)]
pub struct TerminalHost {
    closed: AtomicBool,
}

impl TerminalHost {
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl ModalHost for TerminalHost {
    fn show_toast(&self, message: String) {
        println!("✔ {message}");
    }

    fn reset_to_home(&self) {
        tracing::debug!("navigating to home");
    }

    fn close_modal(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// Line-based dialogue with the user.
pub struct Console<R, W> {
    input: R,
    output: W,
}

/// A console on the process's stdin and stdout.
pub fn stdio() -> Console<StdinLock<'static>, Stdout> {
    Console::new(io::stdin().lock(), io::stdout())
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}").wrap_err("writing to terminal")
    }

    /// Prints a view. Inputs are left to the caller, which prompts for each.
    pub fn print_view(&mut self, view: &DeleteAccountView) -> Result<()> {
        self.line("")?;
        self.line(&format!("{} \"{}\"", view.title, view.handle))?;
        if let Some(description) = &view.description {
            self.line(description)?;
        }
        if let Some(error) = &view.error {
            self.line(&format!("✘ {error}"))?;
        }
        let controls: Vec<_> = view
            .controls
            .iter()
            .map(|control| format!("[{}]", control.label))
            .collect();
        if !controls.is_empty() {
            self.line(&controls.join(" "))?;
        }
        Ok(())
    }

    /// Reads one line after printing `label`. Returns `None` on EOF.
    pub fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label} ").wrap_err("writing to terminal")?;
        self.output.flush().wrap_err("flushing terminal")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .wrap_err("reading terminal")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Asks a yes/no question; anything but `y`/`yes` is a no.
    pub fn confirm(&mut self, label: &str) -> Result<bool> {
        let answer = self.prompt(&format!("{label} [y/N]"))?;
        Ok(matches!(
            answer.as_deref().map(str::trim),
            Some("y" | "Y" | "yes")
        ))
    }
}

#[cfg(test)]
impl<R> Console<R, Vec<u8>> {
    pub fn transcript(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}
