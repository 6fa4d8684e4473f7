use std::future::Future;

use crate::{command::CommandProperties, StepKitError};

use super::StepContext;

impl StepContext {
    /// Opens a collapsible log group. Groups do not nest.
    pub fn start_group(&self, name: &str) -> Result<(), StepKitError> {
        self.issue_command("group", CommandProperties::new(), name)
    }

    pub fn end_group(&self) -> Result<(), StepKitError> {
        self.issue_command("endgroup", CommandProperties::new(), "")
    }

    /// Runs `fut` inside a log group named `name`.
    pub async fn group<F, T>(&self, name: &str, fut: F) -> Result<T, StepKitError>
    where
        F: Future<Output = T>,
    {
        self.start_group(name)?;
        let result = fut.await;
        self.end_group()?;
        Ok(result)
    }
}
