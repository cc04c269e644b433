//! Host capabilities the front ends inject: speech output, dictation, and token storage.
//!
//! The assessment core never touches these; the CLI uses [`ConsolePlatform`] and tests use
//! [`MemoryPlatform`].

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("dictation was not started")]
    DictationNotStarted,
    #[error("no speech was captured")]
    NothingCaptured,
    #[error("platform io failed: {0}")]
    Io(#[from] io::Error),
}

pub trait PlatformServices: Send + Sync {
    fn speak(&self, text: &str) -> Result<(), PlatformError>;
    fn start_dictation(&self) -> Result<(), PlatformError>;
    /// Ends dictation and returns the captured transcript.
    fn stop_dictation(&self) -> Result<String, PlatformError>;
    fn persisted_token(&self) -> Option<String>;
    fn set_persisted_token(&self, token: Option<String>);
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct ConsoleIo<R, W> {
    input: R,
    output: W,
    dictating: bool,
}

/// Terminal stand-in: speech is printed and dictation reads one line of input.
pub struct ConsolePlatform<R = io::BufReader<io::Stdin>, W = io::Stdout> {
    io: Mutex<ConsoleIo<R, W>>,
    token: Mutex<Option<String>>,
}

impl ConsolePlatform {
    pub fn stdio() -> Self {
        Self::new(io::BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePlatform<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            io: Mutex::new(ConsoleIo {
                input,
                output,
                dictating: false,
            }),
            token: Mutex::new(None),
        }
    }

    pub fn into_output(self) -> W {
        self.io
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .output
    }
}

impl<R, W> PlatformServices for ConsolePlatform<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn speak(&self, text: &str) -> Result<(), PlatformError> {
        let mut io = lock(&self.io);
        writeln!(io.output, "[voice] {text}")?;
        io.output.flush()?;
        Ok(())
    }

    fn start_dictation(&self) -> Result<(), PlatformError> {
        let mut io = lock(&self.io);
        io.dictating = true;
        write!(io.output, "(listening) > ")?;
        io.output.flush()?;
        Ok(())
    }

    fn stop_dictation(&self) -> Result<String, PlatformError> {
        let mut io = lock(&self.io);
        if !io.dictating {
            return Err(PlatformError::DictationNotStarted);
        }
        io.dictating = false;

        let mut line = String::new();
        if io.input.read_line(&mut line)? == 0 {
            return Err(PlatformError::NothingCaptured);
        }
        let transcript = line.trim_end_matches(['\r', '\n']).to_string();
        debug!(chars = transcript.len(), "dictation captured");
        Ok(transcript)
    }

    fn persisted_token(&self) -> Option<String> {
        lock(&self.token).clone()
    }

    fn set_persisted_token(&self, token: Option<String>) {
        *lock(&self.token) = token;
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    spoken: Vec<String>,
    transcripts: VecDeque<String>,
    dictating: bool,
    token: Option<String>,
}

/// Scripted platform: queued transcripts are returned in order, speech is recorded.
#[derive(Debug, Default)]
pub struct MemoryPlatform {
    state: Mutex<MemoryState>,
}

impl MemoryPlatform {
    pub fn with_transcripts<I, S>(transcripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let platform = Self::default();
        lock(&platform.state)
            .transcripts
            .extend(transcripts.into_iter().map(Into::into));
        platform
    }

    pub fn spoken(&self) -> Vec<String> {
        lock(&self.state).spoken.clone()
    }
}

impl PlatformServices for MemoryPlatform {
    fn speak(&self, text: &str) -> Result<(), PlatformError> {
        lock(&self.state).spoken.push(text.to_string());
        Ok(())
    }

    fn start_dictation(&self) -> Result<(), PlatformError> {
        lock(&self.state).dictating = true;
        Ok(())
    }

    fn stop_dictation(&self) -> Result<String, PlatformError> {
        let mut state = lock(&self.state);
        if !state.dictating {
            return Err(PlatformError::DictationNotStarted);
        }
        state.dictating = false;
        state
            .transcripts
            .pop_front()
            .ok_or(PlatformError::NothingCaptured)
    }

    fn persisted_token(&self) -> Option<String> {
        lock(&self.state).token.clone()
    }

    fn set_persisted_token(&self, token: Option<String>) {
        lock(&self.state).token = token;
    }
}
