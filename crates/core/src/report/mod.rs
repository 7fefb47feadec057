//! Run report formatting and dispatch.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::notify::{create_notifier, DispatchOutcome, Notifier, NotifyConfig, NotifyError};
use crate::orchestrator::RunStatistics;

/// Horizontal rule framing the report body.
pub const REPORT_RULE: &str = "────────────────────";

/// The rendered summary of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    text: String,
}

impl RunReport {
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Render statistics into the report text. Duration is truncated to whole
/// seconds.
pub fn build_report(stats: &RunStatistics, duration: Duration) -> RunReport {
    let text = format!(
        "Daily Cat Segregator Report\n\
         {rule}\n\
         Success: {processed}\n\
         Failed: {failed}\n\
         Duration: {seconds} seconds\n\
         \n\
         Segregation Stats:\n\
         Warm: {warm} | Cool: {cool}\n\
         Funny: {funny} | Normal: {normal}\n\
         {rule}\n\
         Oracle Cloud System Status: Online",
        rule = REPORT_RULE,
        processed = stats.processed,
        failed = stats.failed,
        seconds = duration.as_secs(),
        warm = stats.warm,
        cool = stats.cool,
        funny = stats.funny,
        normal = stats.normal,
    );

    RunReport { text }
}

/// Sends reports to at most one notification channel.
#[derive(Clone, Default)]
pub struct Reporter {
    notifier: Option<Arc<dyn Notifier>>,
}

impl Reporter {
    pub fn new(notifier: Option<Arc<dyn Notifier>>) -> Self {
        Self { notifier }
    }

    /// Reporter whose dispatch is a no-op.
    pub fn disabled() -> Self {
        Self { notifier: None }
    }

    pub fn from_config(config: &NotifyConfig) -> Result<Self, NotifyError> {
        Ok(Self::new(create_notifier(config)?))
    }

    pub fn channel(&self) -> Option<&str> {
        self.notifier.as_ref().map(|n| n.channel())
    }

    /// Best-effort delivery. Failures are logged and returned, never raised.
    pub async fn dispatch(&self, report: &RunReport) -> DispatchOutcome {
        let Some(notifier) = &self.notifier else {
            info!("No notification configured");
            return DispatchOutcome::NotConfigured;
        };

        let channel = notifier.channel().to_string();
        match notifier.send(report.text()).await {
            Ok(()) => {
                info!("{} notification sent", channel);
                DispatchOutcome::Sent { channel }
            }
            Err(e) => {
                warn!("{} notification failed: {}", channel, e);
                DispatchOutcome::Failed {
                    channel,
                    error: e.to_string(),
                }
            }
        }
    }
}
