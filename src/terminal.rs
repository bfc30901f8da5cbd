//! Terminal queries for callers constructing a [`Profile`].
//!
//! The core itself consumes a caller-supplied profile; these helpers cover
//! the two mechanical facts a profile builder usually wants — whether the
//! target is a TTY and how big it is. No environment-variable heuristics.
//!
//! # Safety
//!
//! Uses unsafe FFI calls to libc (`isatty`, `ioctl`); these are the
//! standard low-level terminal queries and cannot be avoided.

#![allow(unsafe_code)]

use crate::profile::Profile;
use std::io;
use std::os::unix::io::AsRawFd;

/// Check if the given file descriptor is a TTY.
#[must_use]
pub fn is_tty<F: AsRawFd>(fd: &F) -> bool {
    // SAFETY: isatty is safe to call with any fd
    unsafe { libc::isatty(fd.as_raw_fd()) == 1 }
}

/// Get the terminal size as (columns, rows).
///
/// # Errors
///
/// Returns an error if the size cannot be determined or the terminal
/// reports zero dimensions (which would break layout arithmetic).
pub fn terminal_size() -> io::Result<(u16, u16)> {
    let mut size: libc::winsize = unsafe { std::mem::zeroed() };

    // SAFETY: ioctl with TIOCGWINSZ is safe when passed a valid winsize struct
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &raw mut size) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else if size.ws_col == 0 || size.ws_row == 0 {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "terminal reported zero dimensions",
        ))
    } else {
        Ok((size.ws_col, size.ws_row))
    }
}

/// Build a profile for stdout: the default capable profile sized to the
/// real terminal when stdout is a TTY, the plain profile otherwise.
#[must_use]
pub fn stdout_profile() -> Profile {
    if is_tty(&io::stdout()) {
        let (width, height) = terminal_size().unwrap_or((80, 24));
        Profile::default().with_size(width, height)
    } else {
        Profile::plain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdout_profile_is_consistent() {
        // Under a test harness stdout is usually piped; either way the
        // profile must be internally consistent.
        let profile = stdout_profile();
        if !profile.ansi {
            assert!(!profile.interactive);
        }
        assert!(profile.width > 0);
        assert!(profile.height > 0);
    }
}
