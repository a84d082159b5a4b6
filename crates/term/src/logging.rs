use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "NOTEPANE_LOG";

const VERBOSE_FILTER: &str = "notepane=debug,notepane_workspace=debug,notepane_store=debug,info";

/// Picks the filter: `$NOTEPANE_LOG`, else `--verbose`, else the config
/// value. A directive that fails to parse falls back to `info`.
fn resolve(env: Option<String>, configured: &str, verbose: bool) -> (EnvFilter, Option<String>) {
	let directive = match env {
		Some(directive) if !directive.trim().is_empty() => directive,
		_ if verbose => VERBOSE_FILTER.to_owned(),
		_ => configured.to_owned(),
	};
	match EnvFilter::try_new(&directive) {
		Ok(filter) => (filter, None),
		Err(_) => (EnvFilter::new("info"), Some(directive)),
	}
}

/// Installs the stderr subscriber. stdout is reserved for command output.
pub fn init(configured: &str, verbose: bool) {
	let (filter, rejected) = resolve(std::env::var(LOG_ENV).ok(), configured, verbose);
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(verbose).init();
	if let Some(directive) = rejected {
		tracing::warn!(%directive, "invalid log filter; using 'info'");
	}
}
