use reqwest::Client;
use std::future::Future;
use std::pin::Pin;

use crate::config::Config;
use crate::credential::Credential;
use crate::error::CompletionError;
use crate::model::{CompletionRequest, CompletionResult};
use crate::providers;

pub type CompletionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CompletionResult, CompletionError>> + Send + 'a>>;

/// Boundary between the front-ends and the remote completion endpoint.
pub trait CompletionGateway: Send + Sync {
    fn complete<'a>(
        &'a self,
        request: &'a CompletionRequest,
        credential: &'a Credential,
    ) -> CompletionFuture<'a>;
}

/// Gateway backed by the real HTTP provider.
pub struct HostCompletionGateway {
    client: Client,
    cfg: Config,
}

impl HostCompletionGateway {
    pub fn new(client: Client, cfg: Config) -> Self {
        Self { client, cfg }
    }
}

impl CompletionGateway for HostCompletionGateway {
    fn complete<'a>(
        &'a self,
        request: &'a CompletionRequest,
        credential: &'a Credential,
    ) -> CompletionFuture<'a> {
        Box::pin(providers::openrouter::complete(
            &self.client,
            &self.cfg,
            request,
            credential,
        ))
    }
}
