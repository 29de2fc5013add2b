use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result, ResultExt};
use goproxy_client::{
    CancellationToken, ClientConfig, ContentStream, ModuleProxy, ProxyChain, VersionInfo,
};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::runtime::Runtime;
use tracing::debug;

pub fn execute(cli: Cli) -> Result<()> {
    let rt = Runtime::new()
        .map_err(|e| CliError::Other(format!("Failed to create async runtime: {}", e)))?;

    rt.block_on(execute_async(cli))
}

async fn execute_async(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    let spec = config.resolve_goproxy();
    debug!(goproxy = %spec, "resolved proxy chain");

    let token = CancellationToken::new();
    let ctrl_c = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let chain = ProxyChain::new(&spec, &config)?.with_cancellation(token);
    let mut stdout = tokio::io::stdout();
    run_command(&chain, &cli.command, &mut stdout).await
}

/// Merge the config file with command line overrides
pub fn resolve_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::load_from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => ClientConfig::default(),
    };

    if let Some(proxy) = &cli.proxy {
        config.goproxy = Some(proxy.clone());
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_seconds = Some(timeout);
    }
    Ok(config)
}

/// Run one subcommand against `proxy`, writing results to `out`
pub async fn run_command<P, W>(proxy: &P, command: &Commands, out: &mut W) -> Result<()>
where
    P: ModuleProxy,
    W: AsyncWrite + Unpin,
{
    match command {
        Commands::Info { modules } => {
            for arg in modules {
                let (path, version) = split_module_version(arg)?;
                let info = proxy
                    .info(path, version)
                    .await
                    .with_context(|| format!("getting info for {arg}"))?;
                write_info(out, &info)
                    .await
                    .with_context(|| format!("encoding info for {arg}"))?;
            }
        }
        Commands::Latest { modules } => {
            for arg in modules {
                let info = proxy
                    .latest(arg)
                    .await
                    .with_context(|| format!("getting latest info for {arg}"))?;
                write_info(out, &info)
                    .await
                    .with_context(|| format!("encoding latest info for {arg}"))?;
            }
        }
        Commands::List { modules } => {
            let headed = modules.len() > 1;
            for arg in modules {
                let versions = proxy
                    .list(arg)
                    .await
                    .with_context(|| format!("getting versions for {arg}"))?;
                let text = format_list(arg, &versions, headed);
                out.write_all(text.as_bytes()).await?;
            }
            out.flush().await?;
        }
        Commands::Mod { module } => {
            let (path, version) = split_module_version(module)?;
            let content = proxy
                .mod_file(path, version)
                .await
                .with_context(|| format!("getting mod file for {module}"))?;
            copy_content(content, out)
                .await
                .with_context(|| format!("writing mod file for {module}"))?;
        }
        Commands::Zip { module } => {
            let (path, version) = split_module_version(module)?;
            let content = proxy
                .zip(path, version)
                .await
                .with_context(|| format!("getting zip file for {module}"))?;
            copy_content(content, out)
                .await
                .with_context(|| format!("writing zip file for {module}"))?;
        }
    }

    Ok(())
}

/// Split `PATH@VERSION`; exactly one `@` is allowed
pub fn split_module_version(arg: &str) -> Result<(&str, &str)> {
    match arg.split_once('@') {
        Some((path, version)) if !version.contains('@') => Ok((path, version)),
        _ => Err(CliError::NotModuleVersion(arg.to_string())),
    }
}

async fn write_info<W: AsyncWrite + Unpin>(out: &mut W, info: &VersionInfo) -> Result<()> {
    let mut buf = serde_json::to_vec_pretty(&info.fields)?;
    buf.push(b'\n');
    out.write_all(&buf).await?;
    out.flush().await?;
    Ok(())
}

async fn copy_content<W: AsyncWrite + Unpin>(content: ContentStream, out: &mut W) -> Result<()> {
    let written = content.copy_to(out).await?;
    debug!(bytes = written, "wrote content");
    Ok(())
}

/// Render a version listing; with several modules each block gets a header
pub fn format_list(path: &str, versions: &[String], headed: bool) -> String {
    let indent = if headed { "  " } else { "" };
    let mut text = if headed { format!("{path}:\n") } else { String::new() };
    for version in versions {
        text.push_str(indent);
        text.push_str(version);
        text.push('\n');
    }
    text
}
