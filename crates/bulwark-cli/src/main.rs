//! bulwark - security posture at a glance
//!
//! Scores secrets and combines network, credential and system checks into
//! one posture score.

use anyhow::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    bulwark_cli::run().await
}
