//! SIGINT bridge.
//!
//! The handler only stores into a static flag; [`AppContext`] drains it once
//! per loop iteration. `SA_RESETHAND` restores the default action, so a second
//! Ctrl-C kills a process stuck in a blocking swap.
//!
//! [`AppContext`]: super::AppContext

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

extern "C" fn on_sigint(_sig: libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Installs the one-shot SIGINT handler.
pub fn install_interrupt_handler() -> io::Result<()> {
    unsafe {
        let mut action: libc::sigaction = std::mem::zeroed();
        action.sa_sigaction = on_sigint as libc::sighandler_t;
        action.sa_flags = libc::SA_RESETHAND;
        libc::sigemptyset(&mut action.sa_mask);

        if libc::sigaction(libc::SIGINT, &action, std::ptr::null_mut()) != 0 {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}

/// Returns whether an interrupt arrived since the last call, and clears it.
pub(crate) fn take_interrupt() -> bool {
    INTERRUPTED.swap(false, Ordering::SeqCst)
}
