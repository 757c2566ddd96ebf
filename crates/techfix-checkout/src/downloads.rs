//! Agent Download Tracking
//!
//! The packaged desktop agents live on GitHub releases; the only logic
//! here is the fire-and-forget analytics ping when a download starts.

use techfix_api::BackendClient;

/// Current packaged agent version
pub const AGENT_VERSION: &str = "1.0.0";

/// Platforms the desktop agent ships for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentPlatform {
    Linux,
    Windows,
}

impl AgentPlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentPlatform::Linux => "linux",
            AgentPlatform::Windows => "windows",
        }
    }

    /// Release artifact for this platform
    pub fn download_url(&self) -> &'static str {
        match self {
            AgentPlatform::Linux => {
                "https://github.com/Boluex/techfix-frontend/releases/download/v1.0.0/AI_Tech_Repairer_Agent_Linux.zip"
            }
            AgentPlatform::Windows => {
                "https://github.com/Boluex/techfix-frontend/releases/download/v1.0.0/TechFixAgent.zip"
            }
        }
    }
}

/// Record a download start. Never fails the caller; a dead analytics
/// pipeline must not stop anyone from downloading.
pub async fn record_download(client: &BackendClient, platform: AgentPlatform) {
    client.track_download(platform.as_str(), AGENT_VERSION).await;
}
