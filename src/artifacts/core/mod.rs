//! Shared output plumbing
//!
//! Audit trails can run to thousands of lines, so interactive runs go
//! through the minus pager while redirected output is written straight
//! through. The pager does not implement `std::io::Write` itself; the
//! writer below adapts it so commands can treat both destinations alike.
//!
//! ## Usage
//!
//! ```ignore
//! let (writer, pager) = long_output_writer();
//! let project = Project::new(store, "en", writer);
//! project.audit(&opts)?;
//! if let Some(pager) = pager {
//!     minus::page_all(pager)?;
//! }
//! ```

use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// `Write` adapter over the minus pager
pub struct PagedWriter {
    pager: Pager,
}

impl Write for PagedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(text).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Pick the output destination for long listings
///
/// On a terminal, returns a pager-backed writer plus the pager handle the
/// caller hands to `minus::page_all` once the command has finished writing.
/// Redirected output gets plain stdout and no handle.
pub fn long_output_writer() -> (Box<dyn Write>, Option<Pager>) {
    if io::stdout().is_terminal() {
        let pager = Pager::new();
        (
            Box::new(PagedWriter {
                pager: pager.clone(),
            }),
            Some(pager),
        )
    } else {
        (Box::new(io::stdout()), None)
    }
}
