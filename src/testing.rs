//! Support for testing applications built on this crate.
//!
//! Dispatch writes through the application's sinks, so a test
//! application with captured buffers is all it takes to assert on
//! output while cases run in parallel: every dispatch builds its own
//! command instance and the descriptor stays read-only.

use std::io;
use std::sync::{Arc, Mutex, Once};

use crate::application::Application;
use crate::command::Command;
use crate::env::EnvVarDef;

/// A clonable in-memory sink. Clones share the same buffer, so the
/// handle handed to the dispatcher and the one kept by the test observe
/// the same bytes.
#[derive(Debug, Clone, Default)]
pub struct SharedBuf {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuf {
    /// A fresh, empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        let bytes = self.inner.lock().expect("sink lock poisoned");
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Discards everything written so far.
    pub fn clear(&self) {
        self.inner.lock().expect("sink lock poisoned").clear();
    }
}

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner
            .lock()
            .expect("sink lock poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// An [`Application`] over static metadata with captured sinks.
#[derive(Debug)]
pub struct TestApp {
    name: &'static str,
    title: &'static str,
    commands: &'static [&'static Command],
    env_vars: &'static [EnvVarDef],
    out: SharedBuf,
    err: SharedBuf,
}

impl TestApp {
    /// A test application with empty sinks and no declared env vars.
    pub fn new(
        name: &'static str,
        title: &'static str,
        commands: &'static [&'static Command],
    ) -> Self {
        Self {
            name,
            title,
            commands,
            env_vars: &[],
            out: SharedBuf::new(),
            err: SharedBuf::new(),
        }
    }

    /// Declares environment variables on the application.
    #[must_use]
    pub fn with_env_vars(mut self, env_vars: &'static [EnvVarDef]) -> Self {
        self.env_vars = env_vars;
        self
    }

    /// Everything written to the output sink so far.
    pub fn out_str(&self) -> String {
        self.out.contents()
    }

    /// Everything written to the error sink so far.
    pub fn err_str(&self) -> String {
        self.err.contents()
    }

    /// Discards the contents of both sinks.
    pub fn clear(&self) {
        self.out.clear();
        self.err.clear();
    }
}

impl Application for TestApp {
    fn name(&self) -> &str {
        self.name
    }

    fn title(&self) -> &str {
        self.title
    }

    fn commands(&self) -> &[&Command] {
        self.commands
    }

    fn env_vars(&self) -> &[EnvVarDef] {
        self.env_vars
    }

    fn out(&self) -> Box<dyn io::Write + '_> {
        Box::new(self.out.clone())
    }

    fn err(&self) -> Box<dyn io::Write + '_> {
        Box::new(self.err.clone())
    }
}

/// Initializes logging for tests: quiet by default, honoring `RUST_LOG`
/// when set. Safe to call from every test.
pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}
