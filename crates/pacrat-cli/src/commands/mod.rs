//! Command dispatch: argument validation and provider wiring.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use pacrat_cache::QueryCache;
use pacrat_core::{Index, PacratError};
use pacrat_providers::{
    ClientConfig, CratesIoProvider, DockerHubProvider, HttpClient, NpmProvider, PypiProvider,
    DEFAULT_USER_AGENT,
};

use crate::output;
use crate::Commands;

/// Providers wired to one shared transport and cache
pub struct CommandContext {
    pypi: PypiProvider,
    npm: NpmProvider,
    crates: CratesIoProvider,
    docker: DockerHubProvider,
}

impl CommandContext {
    /// Build the shared transport and, unless disabled, the query cache,
    /// then hand both to every provider.
    pub fn new(
        user_agent: Option<String>,
        cache_enabled: bool,
        timeout: Duration,
    ) -> Result<Self, PacratError> {
        let config = ClientConfig {
            user_agent: user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            timeout,
        };
        let http = HttpClient::new(&config)?;
        let cache = cache_enabled.then(|| Arc::new(QueryCache::with_defaults()));
        debug!(cache_enabled, "provider context ready");

        Ok(CommandContext {
            pypi: PypiProvider::new(http.clone(), cache.clone()),
            npm: NpmProvider::new(http.clone(), cache.clone()),
            crates: CratesIoProvider::new(http.clone(), cache.clone()),
            docker: DockerHubProvider::new(http, cache),
        })
    }
}

/// Route a parsed command to its provider and print the result
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> anyhow::Result<()> {
    match command {
        Commands::Search { index, query, limit } => {
            let index: Index = index.parse()?;
            match index {
                Index::Pypi => output::print_json(&ctx.pypi.search(&query, limit).await?),
                Index::Npm => output::print_json(&ctx.npm.search(&query, limit).await?),
                Index::Crates => output::print_json(&ctx.crates.search(&query, limit).await?),
                Index::Docker => output::print_json(&ctx.docker.search(&query, limit).await?),
            }
        }
        Commands::Info { index, name, version } => {
            let index: Index = index.parse()?;
            let version = version.as_deref();
            match index {
                Index::Pypi => output::print_json(&ctx.pypi.info(&name, version).await?),
                Index::Npm => output::print_json(&ctx.npm.info(&name, version).await?),
                Index::Crates => output::print_json(&ctx.crates.info(&name, version).await?),
                Index::Docker => Err(PacratError::validation(
                    "docker images have tags, not versions; use `pacrat tags` or `pacrat tag-info`",
                )
                .into()),
            }
        }
        Commands::Tags { image } => output::print_json(&ctx.docker.tags(&image).await?),
        Commands::TagInfo { image, tag } => {
            output::print_json(&ctx.docker.tag_info(&image, &tag).await?)
        }
    }
}

#[cfg(test)]
mod tests;
