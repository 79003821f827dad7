//! File-descriptor level interception of stdout or stderr.
//!
//! The target descriptor is pointed at the write end of a pipe. A reader
//! thread moves everything written into a shared buffer as soon as it
//! arrives, so writers never wait on the frame loop. Draining takes the
//! buffer plus whatever is still in the pipe, under the same lock the
//! thread reads with, so byte order is preserved and output written before
//! a drain is always part of it. The original destination is kept open and
//! put back on uninstall or drop.

use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::{self, Read, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Bytes read from the pipe per `read` call.
const READ_CHUNK: usize = 8 * 1024;

/// Requested pipe buffer size on Linux. Fewer wakeups of the reader thread
/// during bursts.
#[cfg(target_os = "linux")]
const PIPE_BUFFER_BYTES: libc::c_int = 1024 * 1024;

/// How long uninstall waits for the reader thread to see end-of-file.
///
/// A child process that inherited the stream keeps the pipe open; the
/// thread is then left to finish on its own.
const READER_EXIT_TIMEOUT: Duration = Duration::from_millis(500);

/// Which process stream is intercepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureStream {
    /// Standard output (file descriptor 1)
    Stdout,
    /// Standard error (file descriptor 2)
    #[default]
    Stderr,
}

impl CaptureStream {
    #[cfg(unix)]
    fn raw_fd(self) -> libc::c_int {
        match self {
            CaptureStream::Stdout => libc::STDOUT_FILENO,
            CaptureStream::Stderr => libc::STDERR_FILENO,
        }
    }

    /// Push anything buffered in the std handle down to the descriptor.
    fn flush_std(self) {
        let _ = match self {
            CaptureStream::Stdout => io::stdout().flush(),
            CaptureStream::Stderr => io::stderr().flush(),
        };
    }
}

impl fmt::Display for CaptureStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureStream::Stdout => f.write_str("stdout"),
            CaptureStream::Stderr => f.write_str("stderr"),
        }
    }
}

/// Errors raised while installing or removing the interception.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The platform has no descriptor-level redirection
    #[error("Output capture is not supported on this platform")]
    Unsupported,

    /// A system call failed
    #[error("Failed to {operation} while redirecting {stream}: {source}")]
    Os {
        /// The system call that failed
        operation: &'static str,
        /// The stream being redirected
        stream: CaptureStream,
        /// The underlying OS error
        #[source]
        source: io::Error,
    },
}

type SharedBuffer = Arc<Mutex<Vec<u8>>>;

fn lock(buffer: &SharedBuffer) -> MutexGuard<'_, Vec<u8>> {
    buffer.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Background thread that keeps the pipe empty.
#[derive(Debug)]
struct ReaderThread {
    handle: JoinHandle<()>,
    exited: Receiver<()>,
}

impl ReaderThread {
    fn spawn(pipe: Arc<File>, buffer: SharedBuffer) -> io::Result<Self> {
        let (exit_tx, exited) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("output-capture".to_string())
            .spawn(move || {
                pump(&pipe, &buffer);
                let _ = exit_tx.send(());
            })?;
        Ok(Self { handle, exited })
    }

    /// Wait for the thread to reach end-of-file, bounded by
    /// [`READER_EXIT_TIMEOUT`].
    fn finish(self) {
        match self.exited.recv_timeout(READER_EXIT_TIMEOUT) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                if self.handle.join().is_err() {
                    warn!("Output capture reader thread panicked");
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!("Capture pipe still open elsewhere; detaching reader thread");
            }
        }
    }
}

/// Reader thread body: wait for data, then move it into `buffer`.
///
/// Waiting happens without the lock; reading happens with it, so a drain on
/// the frame thread and this loop never interleave partial reads.
fn pump(pipe: &File, buffer: &SharedBuffer) {
    loop {
        if let Err(err) = sys::wait_readable(pipe) {
            warn!(error = %err, "Waiting on capture pipe failed; reader stopping");
            return;
        }
        let mut pending = lock(buffer);
        let (_, end_of_file) = read_nonblocking(pipe, &mut pending);
        if end_of_file {
            return;
        }
    }
}

/// An installed interception of one process stream.
///
/// Dropping the value restores the original destination, so the stream is
/// never left pointing at a pipe nobody reads.
#[derive(Debug)]
pub struct OutputCapture {
    stream: CaptureStream,
    /// Non-blocking read end of the pipe, shared with the reader thread
    pipe: Arc<File>,
    /// Bytes the reader thread took out of the pipe since the last drain
    buffer: SharedBuffer,
    reader: Option<ReaderThread>,
    /// Original destination; `None` once restored
    saved: Option<File>,
    /// Also forward drained bytes to the original destination
    tee: bool,
}

impl OutputCapture {
    /// Start intercepting `stream`.
    ///
    /// # Errors
    ///
    /// Returns `CaptureError::Unsupported` off unix, or `CaptureError::Os`
    /// when a descriptor operation fails or the reader thread cannot start.
    /// On error the stream is left as it was.
    pub fn install(stream: CaptureStream, tee: bool) -> Result<Self, CaptureError> {
        stream.flush_std();
        let (pipe, saved) = sys::redirect(stream)?;

        let mut capture = Self {
            stream,
            pipe: Arc::new(pipe),
            buffer: Arc::new(Mutex::new(Vec::new())),
            reader: None,
            saved: Some(saved),
            tee,
        };
        // On error `capture` is dropped here, which restores the stream
        let reader = ReaderThread::spawn(Arc::clone(&capture.pipe), Arc::clone(&capture.buffer))
            .map_err(|source| CaptureError::Os {
                operation: "start reader thread",
                stream,
                source,
            })?;
        capture.reader = Some(reader);

        debug!(%stream, tee, "Output capture installed");
        Ok(capture)
    }

    /// The intercepted stream.
    pub fn stream(&self) -> CaptureStream {
        self.stream
    }

    /// Whether the interception is still in place.
    pub fn is_installed(&self) -> bool {
        self.saved.is_some()
    }

    /// Move every byte written since the last call into `out`.
    ///
    /// Never waits on writers: the lock is only held by the reader thread
    /// for one non-blocking read. In tee mode the same bytes are also
    /// written to the original destination.
    ///
    /// # Returns
    /// The number of bytes appended to `out`.
    pub fn read_available(&mut self, out: &mut Vec<u8>) -> usize {
        if self.saved.is_none() {
            return 0;
        }

        let start = out.len();
        {
            let mut pending = lock(&self.buffer);
            read_nonblocking(&self.pipe, &mut pending);
            out.append(&mut pending);
        }
        let total = out.len() - start;

        if self.tee && total > 0 {
            if let Some(saved) = self.saved.as_mut() {
                if let Err(err) = saved.write_all(&out[start..]) {
                    debug!(error = %err, "Tee write to original {} failed", self.stream);
                }
            }
        }
        total
    }

    /// Stop intercepting and restore the original destination.
    ///
    /// Bytes not yet drained are forwarded to the original destination.
    ///
    /// # Errors
    ///
    /// Returns `CaptureError::Os` if the descriptor cannot be restored.
    pub fn uninstall(mut self) -> Result<(), CaptureError> {
        self.restore()
    }

    fn restore(&mut self) -> Result<(), CaptureError> {
        let Some(mut saved) = self.saved.take() else {
            return Ok(());
        };
        self.stream.flush_std();
        if let Err(err) = sys::restore(self.stream, &saved) {
            self.saved = Some(saved);
            return Err(err);
        }

        // The stream no longer holds the write end, so the pipe reaches EOF
        if let Some(reader) = self.reader.take() {
            reader.finish();
        }
        let residual = {
            let mut pending = lock(&self.buffer);
            read_nonblocking(&self.pipe, &mut pending);
            std::mem::take(&mut *pending)
        };
        if !residual.is_empty() {
            if let Err(err) = saved.write_all(&residual) {
                debug!(error = %err, "Could not forward residual captured output");
            }
        }
        debug!(stream = %self.stream, residual = residual.len(), "Output capture removed");
        Ok(())
    }
}

impl Drop for OutputCapture {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!(error = %err, "Failed to restore captured stream");
        }
    }
}

/// Read until the pipe is empty.
///
/// # Returns
/// (bytes appended, whether end-of-file was reached)
fn read_nonblocking(mut reader: &File, out: &mut Vec<u8>) -> (usize, bool) {
    let mut chunk = [0u8; READ_CHUNK];
    let mut total = 0;
    loop {
        match reader.read(&mut chunk) {
            Ok(0) => return (total, true),
            Ok(n) => {
                out.extend_from_slice(&chunk[..n]);
                total += n;
            }
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => return (total, false),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                warn!(error = %err, "Reading captured output failed");
                return (total, true);
            }
        }
    }
}

#[cfg(unix)]
mod sys {
    use super::{CaptureError, CaptureStream};
    use std::fs::File;
    use std::io;
    use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

    fn os_error(operation: &'static str, stream: CaptureStream) -> CaptureError {
        CaptureError::Os {
            operation,
            stream,
            source: io::Error::last_os_error(),
        }
    }

    /// Point `stream` at a fresh pipe. Returns (read end, original destination).
    pub(super) fn redirect(stream: CaptureStream) -> Result<(File, File), CaptureError> {
        let target = stream.raw_fd();

        // SAFETY: dup on a descriptor number has no memory-safety preconditions
        let saved = unsafe { libc::dup(target) };
        if saved < 0 {
            return Err(os_error("duplicate descriptor", stream));
        }
        // SAFETY: `saved` is a freshly created descriptor owned by nobody else
        let saved = unsafe { OwnedFd::from_raw_fd(saved) };

        let mut fds: [libc::c_int; 2] = [0; 2];
        // SAFETY: `fds` has room for the two descriptors pipe() writes
        if unsafe { libc::pipe(fds.as_mut_ptr()) } < 0 {
            return Err(os_error("create pipe", stream));
        }
        // SAFETY: pipe() succeeded, both descriptors are new and unowned
        let (read_end, write_end) =
            unsafe { (OwnedFd::from_raw_fd(fds[0]), OwnedFd::from_raw_fd(fds[1])) };

        set_nonblocking(&read_end).map_err(|source| CaptureError::Os {
            operation: "set pipe non-blocking",
            stream,
            source,
        })?;
        // Child processes inherit the stream itself, never our private ends
        for fd in [&read_end, &saved] {
            set_cloexec(fd).map_err(|source| CaptureError::Os {
                operation: "mark descriptor close-on-exec",
                stream,
                source,
            })?;
        }
        enlarge_pipe(&read_end);

        // SAFETY: both descriptors are open; dup2 atomically replaces `target`
        if unsafe { libc::dup2(write_end.as_raw_fd(), target) } < 0 {
            return Err(os_error("redirect stream", stream));
        }
        // `target` now holds the only write end we need
        drop(write_end);

        Ok((File::from(read_end), File::from(saved)))
    }

    pub(super) fn restore(stream: CaptureStream, saved: &File) -> Result<(), CaptureError> {
        // SAFETY: `saved` is open for the lifetime of the borrow
        if unsafe { libc::dup2(saved.as_raw_fd(), stream.raw_fd()) } < 0 {
            return Err(os_error("restore stream", stream));
        }
        Ok(())
    }

    /// Block until `pipe` has data or its write side is gone.
    pub(super) fn wait_readable(pipe: &File) -> io::Result<()> {
        let mut poll_fd = libc::pollfd {
            fd: pipe.as_raw_fd(),
            events: libc::POLLIN,
            revents: 0,
        };
        loop {
            // SAFETY: `poll_fd` is a valid pollfd for the duration of the call
            let ready = unsafe { libc::poll(&mut poll_fd, 1, -1) };
            if ready >= 0 {
                return Ok(());
            }
            let err = io::Error::last_os_error();
            if err.kind() != io::ErrorKind::Interrupted {
                return Err(err);
            }
        }
    }

    fn set_cloexec(fd: &OwnedFd) -> io::Result<()> {
        // SAFETY: fcntl on an owned, open descriptor
        unsafe {
            let flags = libc::fcntl(fd.as_raw_fd(), libc::F_GETFD);
            if flags == -1 {
                return Err(io::Error::last_os_error());
            }
            if libc::fcntl(fd.as_raw_fd(), libc::F_SETFD, flags | libc::FD_CLOEXEC) == -1 {
                return Err(io::Error::last_os_error());
            }
        }
        Ok(())
    }

    fn set_nonblocking(fd: &OwnedFd) -> io::Result<()> {
        // SAFETY: fcntl on an owned, open descriptor
        unsafe {
            let flags = libc::fcntl(fd.as_raw_fd(), libc::F_GETFL);
            if flags == -1 {
                return Err(io::Error::last_os_error());
            }
            if libc::fcntl(fd.as_raw_fd(), libc::F_SETFL, flags | libc::O_NONBLOCK) == -1 {
                return Err(io::Error::last_os_error());
            }
        }
        Ok(())
    }

    #[cfg(target_os = "linux")]
    fn enlarge_pipe(fd: &OwnedFd) {
        // SAFETY: fcntl on an owned, open descriptor; failure is harmless
        let result =
            unsafe { libc::fcntl(fd.as_raw_fd(), libc::F_SETPIPE_SZ, super::PIPE_BUFFER_BYTES) };
        if result < 0 {
            tracing::debug!("Could not enlarge capture pipe, keeping default size");
        }
    }

    #[cfg(not(target_os = "linux"))]
    fn enlarge_pipe(_fd: &OwnedFd) {}
}

#[cfg(not(unix))]
mod sys {
    use super::{CaptureError, CaptureStream};
    use std::fs::File;

    pub(super) fn redirect(_stream: CaptureStream) -> Result<(File, File), CaptureError> {
        Err(CaptureError::Unsupported)
    }

    pub(super) fn restore(_stream: CaptureStream, _saved: &File) -> Result<(), CaptureError> {
        Err(CaptureError::Unsupported)
    }

    pub(super) fn wait_readable(_pipe: &File) -> std::io::Result<()> {
        Err(std::io::Error::from(std::io::ErrorKind::Unsupported))
    }
}
