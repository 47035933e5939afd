// SPDX-FileCopyrightText: 2025 Timothy Pogue
//
// SPDX-License-Identifier: ISC

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[
    clap(
        name = "pushsecret-operator",
        version,
        author,
        about = "Validate secret stores and resolve PushSecret resources"
    )
]
pub struct CliArgs {
    /// Path to a JSON or YAML configuration file
    #[clap(long, short, global = true, env = "PUSHSECRET_OPERATOR_CONFIG")]
    pub config: Option<String>,
    /// Log format, overrides the configuration (json or text)
    #[clap(long, global = true)]
    pub log_format: Option<String>,
    #[clap(subcommand)]
    pub cmd: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[
        clap(
            name = "crds",
            about = "Generate Custom Resource Definitions (CRDs) for the operator"
        )
    ]
    Crds,
    #[
        clap(
            name = "validate-store",
            about = "Validate a store configuration and check access to its secrets"
        )
    ]
    ValidateStore {
        /// Path to the store configuration (YAML or JSON)
        #[clap(long, short)]
        file: String,
        /// Namespace of the resource the store is used from, if known
        #[clap(long, short)]
        namespace: Option<String>,
        /// Only run the structural checks
        #[clap(long)]
        offline: bool,
    },
    #[
        clap(
            name = "resolve",
            about = "Show which remote keys a PushSecret would write, without pushing"
        )
    ]
    Resolve {
        /// Path to the PushSecret manifest
        #[clap(long)]
        push_secret: String,
        /// Path to the source Secret manifest
        #[clap(long)]
        secret: String,
    },
    #[
        clap(
            name = "webhook",
            about = "Run the admission webhook server",
        )
    ]
    Webhook,
}
