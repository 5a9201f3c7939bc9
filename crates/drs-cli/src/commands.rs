use anyhow::Context;
use colored::Colorize;

use drs_registry::{generate_id, CharsetSpec};
use drs_server::{DrsServer, ServerConfig};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::GenId(args) => cmd_gen_id(args, cli.format),
        Command::CheckConfig(args) => cmd_check_config(args, cli.format),
    }
}

fn load_config(path: Option<&str>) -> anyhow::Result<ServerConfig> {
    match path {
        Some(path) => ServerConfig::load(path).with_context(|| format!("loading {path}")),
        None => {
            let mut config = ServerConfig::default();
            config.apply_env()?;
            Ok(config)
        }
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let server = DrsServer::new(config)?;
    println!(
        "{} DRS server on {} (base URL {})",
        "✓".green().bold(),
        server.config().bind_addr.to_string().bold(),
        server.config().registry.service.base_url().cyan()
    );
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn generate_ids(charset: &str, length: usize, count: usize) -> anyhow::Result<Vec<String>> {
    let resolved = CharsetSpec::from(charset)
        .resolve()
        .with_context(|| format!("resolving charset {charset:?}"))?;
    Ok((0..count).map(|_| generate_id(&resolved, length)).collect())
}

fn cmd_gen_id(args: GenIdArgs, format: OutputFormat) -> anyhow::Result<()> {
    let ids = generate_ids(&args.charset, args.length, args.count)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&ids)?),
        OutputFormat::Text => ids.iter().for_each(|id| println!("{id}")),
    }
    Ok(())
}

/// What `check-config` reports about a valid file.
#[derive(Debug)]
struct ConfigSummary {
    bind_addr: String,
    base_url: String,
    object_charset: usize,
    access_charset: usize,
    service_info: Option<String>,
    auth: bool,
}

fn check_config(path: &str) -> anyhow::Result<ConfigSummary> {
    let config = load_config(Some(path))?;
    config.validate()?;
    let registry = &config.registry;
    Ok(ConfigSummary {
        bind_addr: config.bind_addr.to_string(),
        base_url: registry.service.base_url(),
        object_charset: registry.objects.resolve()?.len(),
        access_charset: registry.access_methods.resolve()?.len(),
        service_info: config.service_info.as_ref().map(|info| info.id.clone()),
        auth: !config.admin_tokens.is_empty(),
    })
}

fn cmd_check_config(args: CheckConfigArgs, format: OutputFormat) -> anyhow::Result<()> {
    let summary = match check_config(&args.config) {
        Ok(summary) => summary,
        Err(e) => {
            println!("{} {}: {:#}", "✗".red().bold(), args.config.bold(), e);
            return Err(e);
        }
    };
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "bind_addr": summary.bind_addr,
                "base_url": summary.base_url,
                "object_charset_size": summary.object_charset,
                "access_charset_size": summary.access_charset,
                "service_info": summary.service_info,
                "auth": summary.auth,
            })
        ),
        OutputFormat::Text => {
            println!("{} {} is valid", "✓".green().bold(), args.config.bold());
            println!("  Bind:         {}", summary.bind_addr.bold());
            println!("  Base URL:     {}", summary.base_url.cyan());
            println!("  Object ids:   {} characters", summary.object_charset);
            println!("  Access ids:   {} characters", summary.access_charset);
            match &summary.service_info {
                Some(id) => println!("  Service info: {}", id.yellow()),
                None => println!("  Service info: {}", "not configured".dimmed()),
            }
            let auth = if summary.auth { "bearer tokens".green() } else { "open".yellow() };
            println!("  Writes:       {auth}");
        }
    }
    Ok(())
}
