use std::{
    io::{self, Write},
    sync::{Arc, Mutex},
};

use crate::{
    context::StepContext,
    env::{EnvStore, ProcessEnv},
};

pub struct StepContextBuilder {
    pub(crate) env: Option<Arc<dyn EnvStore>>,
    pub(crate) stdout: Option<Box<dyn Write + Send>>,
}

impl Default for StepContextBuilder {
    fn default() -> Self {
        Self {
            env: None,
            stdout: None,
        }
    }
}

impl StepContextBuilder {
    /// Environment the context reads inputs from and mutates. Defaults to
    /// the process environment.
    pub fn env(mut self, env: Arc<dyn EnvStore>) -> Self {
        self.env = Some(env);
        self
    }

    /// Sink for workflow commands. Defaults to standard output.
    pub fn stdout(mut self, writer: impl Write + Send + 'static) -> Self {
        self.stdout = Some(Box::new(writer));
        self
    }

    pub fn build(self) -> StepContext {
        StepContext::from_parts(
            self.env.unwrap_or_else(|| Arc::new(ProcessEnv)),
            Arc::new(Mutex::new(
                self.stdout.unwrap_or_else(|| Box::new(io::stdout())),
            )),
        )
    }
}
