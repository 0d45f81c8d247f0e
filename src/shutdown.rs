use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

#[cfg(target_os = "linux")]
use nix::sys::{
    signal::{SigSet, Signal},
    signalfd::{SfdFlags, SignalFd},
};
#[cfg(target_os = "linux")]
use std::sync::Mutex;

/// Cooperative stop request, checked by the poll loop at safe points.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    #[cfg(target_os = "linux")]
    signals: Option<Arc<Mutex<SignalFd>>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that is cancelled by SIGINT or SIGTERM.
    ///
    /// Both signals are blocked for the calling thread and read back through a
    /// non-blocking signalfd whenever the token is checked. Call this before
    /// spawning any thread so the mask is inherited.
    #[cfg(target_os = "linux")]
    pub fn on_interrupt() -> Result<Self, crate::Error> {
        let mut mask = SigSet::empty();
        mask.add(Signal::SIGINT);
        mask.add(Signal::SIGTERM);
        mask.thread_block()?;
        let fd = SignalFd::with_flags(&mask, SfdFlags::SFD_NONBLOCK | SfdFlags::SFD_CLOEXEC)?;
        Ok(Self {
            cancelled: Arc::default(),
            signals: Some(Arc::new(Mutex::new(fd))),
        })
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        #[cfg(target_os = "linux")]
        self.drain_signals();
        self.cancelled.load(Ordering::SeqCst)
    }

    #[cfg(target_os = "linux")]
    fn drain_signals(&self) {
        let Some(signals) = &self.signals else {
            return;
        };
        let Ok(mut fd) = signals.lock() else {
            return;
        };
        while let Ok(Some(info)) = fd.read_signal() {
            tracing::debug!(signal = info.ssi_signo, "shutdown requested");
            self.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_shared_between_clones() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
        assert!(token.is_cancelled());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn interrupt_signal_cancels_token() {
        let token = CancelToken::on_interrupt().unwrap();
        assert!(!token.is_cancelled());
        // Pending on this thread only; the mask keeps it from terminating us.
        nix::sys::signal::raise(Signal::SIGINT).unwrap();
        assert!(token.is_cancelled());
    }
}
