// src/progress.rs
/// Lightweight progress reporting for long-running downloads.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of files to dump (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// A file transfer is starting. `total_bytes` comes from Content-Length
    /// when the server sends one.
    fn file_started(&mut self, _name: &str, _total_bytes: Option<u64>) {}

    /// One block of the current file arrived.
    fn bytes_received(&mut self, _n: u64) {}

    /// The current file finished.
    fn file_done(&mut self, _name: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Console sink: one status line per file plus an in-place byte counter.
pub struct ConsoleProgress {
    received: u64,
    total: Option<u64>,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        ConsoleProgress { received: 0, total: None }
    }

    fn print_counter(&self) {
        match self.total {
            Some(total) if total > 0 => {
                let pct = self.received * 100 / total;
                eprint!("\r  {} / {} bytes ({pct}%)", self.received, total);
            }
            _ => eprint!("\r  {} bytes", self.received),
        }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for ConsoleProgress {
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn file_started(&mut self, name: &str, total_bytes: Option<u64>) {
        self.received = 0;
        self.total = total_bytes;
        eprintln!("Dumping '{name}'...");
    }

    fn bytes_received(&mut self, n: u64) {
        self.received += n;
        self.print_counter();
    }

    fn file_done(&mut self, _name: &str) {
        self.print_counter();
        eprintln!();
    }
}
