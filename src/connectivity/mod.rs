//! Connectivity preflight.
//!
//! Updates are only attempted when every required host answers. With a custom
//! host both checks run concurrently and both are awaited before deciding.

mod https;

pub use https::HttpsReachability;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::context::RunContext;
use crate::ui::prelude::*;

#[async_trait]
pub trait Reachability: Send + Sync {
    async fn check(&self, host: &str) -> Result<()>;
}

#[derive(Debug, Error)]
pub enum ConnectivityError {
    #[error("could not reach [{target}]: {reason}")]
    Unreachable { target: String, reason: String },
}

impl ConnectivityError {
    /// The host that failed the preflight
    pub fn target(&self) -> &str {
        match self {
            Self::Unreachable { target, .. } => target,
        }
    }
}

/// Check the mandatory host and, when given, the custom one.
///
/// If both fail, the mandatory host is reported.
pub async fn probe(
    checker: &dyn Reachability,
    mandatory: &str,
    custom: Option<&str>,
    ctx: &RunContext,
) -> Result<(), ConnectivityError> {
    announce(mandatory);
    let Some(custom) = custom else {
        return report(mandatory, checker.check(mandatory).await, ctx);
    };

    announce(custom);
    let (mandatory_result, custom_result) =
        tokio::join!(checker.check(mandatory), checker.check(custom));

    report(mandatory, mandatory_result, ctx)?;
    report(custom, custom_result, ctx)
}

fn announce(host: &str) {
    emit(
        Level::Info,
        "network.test",
        &format!("* Testing connection to [{}]", host),
        None,
    );
}

fn report(host: &str, result: Result<()>, ctx: &RunContext) -> Result<(), ConnectivityError> {
    match result {
        Ok(()) => {
            emit(
                Level::Success,
                "network.ok",
                &format!("* Network test with domain [{}] successful!", host),
                None,
            );
            Ok(())
        }
        Err(e) => {
            emit(
                Level::Error,
                "network.failed",
                &format!("!!Error when testing domain [{}]", host),
                Some(serde_json::json!({ "target": host })),
            );
            ctx.debug("network.error", format!("{:?}", e));
            Err(ConnectivityError::Unreachable {
                target: host.to_string(),
                reason: format!("{:#}", e),
            })
        }
    }
}
