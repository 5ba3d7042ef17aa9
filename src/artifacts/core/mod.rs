//! Output routing
//!
//! Long listings (`log`, `global-log`) go through the minus pager when
//! stdout is a terminal and `NO_PAGER` is unset; everything else is written
//! straight to stdout.

use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// Environment variable disabling the pager
pub const NO_PAGER_ENV: &str = "NO_PAGER";

pub enum Output {
    Stdout,
    Paged(Pager),
}

impl Output {
    pub fn new(wants_pager: bool) -> Self {
        if wants_pager && std::env::var_os(NO_PAGER_ENV).is_none() && io::stdout().is_terminal() {
            Output::Paged(Pager::new())
        } else {
            Output::Stdout
        }
    }

    pub fn writer(&self) -> Box<dyn Write> {
        match self {
            Output::Stdout => Box::new(io::stdout()),
            Output::Paged(pager) => Box::new(PagedWriter {
                pager: pager.clone(),
            }),
        }
    }

    /// Hand the buffered output to the pager, blocking until it is closed.
    pub fn finish(self) -> anyhow::Result<()> {
        match self {
            Output::Stdout => io::stdout().flush().map_err(Into::into),
            Output::Paged(pager) => minus::page_all(pager).map_err(Into::into),
        }
    }
}

/// `Write` adapter feeding text into a pager
struct PagedWriter {
    pager: Pager,
}

impl Write for PagedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        self.pager.push_str(text).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
