use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "goproxyclient")]
#[command(author, version, about = "Query a chain of Go module proxies")]
pub struct Cli {
    /// Proxy chain in GOPROXY syntax (defaults to $GOPROXY, then https://proxy.golang.org; an empty value selects the default proxy)
    #[clap(long, global = true)]
    pub proxy: Option<String>,

    /// TOML configuration file with goproxy, timeout_seconds, follow_redirects and user_agent
    #[clap(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[clap(long, global = true)]
    pub timeout: Option<u64>,

    /// Enable verbose output with additional information
    #[clap(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Get module info
    Info {
        /// Modules in PATH@VERSION form; VERSION may be a branch or commit
        #[clap(required = true, value_name = "PATH@VERSION")]
        modules: Vec<String>,
    },

    /// Get the latest module version
    Latest {
        /// Module paths
        #[clap(required = true, value_name = "PATH")]
        modules: Vec<String>,
    },

    /// List module versions
    List {
        /// Module paths
        #[clap(required = true, value_name = "PATH")]
        modules: Vec<String>,
    },

    /// Get the go.mod file for a module
    Mod {
        #[clap(value_name = "PATH@VERSION")]
        module: String,
    },

    /// Get the zip file for a module
    Zip {
        #[clap(value_name = "PATH@VERSION")]
        module: String,
    },
}
