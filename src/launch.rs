use crate::host::{HostEndpoint, UiMessage};
use std::rc::Rc;

/// Sends launch requests to the host. Fire-and-forget: the call returns as
/// soon as the message is queued and never waits for the outcome.
#[derive(Clone)]
pub struct LaunchInvoker {
    host: Rc<dyn HostEndpoint>,
}

impl LaunchInvoker {
    pub fn new(host: Rc<dyn HostEndpoint>) -> Self {
        Self { host }
    }

    pub fn launch(&self, link_path: &str) {
        tracing::info!(link_path, "launch requested");
        if let Err(e) = self.host.send(UiMessage::Launch {
            link_path: link_path.to_string(),
        }) {
            tracing::warn!(link_path, "launch request dropped: {e}");
        }
    }
}
