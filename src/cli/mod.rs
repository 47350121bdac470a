// src/cli/mod.rs
// Command-line surface for the dashboard

pub mod api_key;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod parse_file;
pub mod session;
pub mod users;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::auth::{AuthService, MainView, SqliteUserRepository};
use crate::settings::AppSettings;
use crate::sheets::filters::{DateRange, RecordFilter, SocialSource};
use crate::sheets::Domain;

pub use error::CliError;

#[derive(Parser)]
#[command(name = "dashly")]
#[command(about = "Dashly - operations dashboard over shared spreadsheet tabs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch every permitted domain and report its sync state
    Sync {
        /// Only sync this domain
        #[arg(long)]
        domain: Option<Domain>,
    },

    /// Show stats, charts and rows for one domain
    View {
        domain: Domain,
        #[command(flatten)]
        filters: FilterArgs,
        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Cross-domain totals and the AI executive summary
    Summary {
        #[command(flatten)]
        range: RangeArgs,
        #[arg(long)]
        json: bool,
    },

    /// Parse a local CSV export with the sheet parser
    Parse {
        file: PathBuf,
        /// Sheet identifier used in record ids
        #[arg(long, default_value = "local")]
        sheet_id: String,
        #[arg(long)]
        json: bool,
    },

    /// Write the filtered rows of a domain to a CSV file
    Export {
        domain: Domain,
        out: PathBuf,
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Start a session (password from --password, DASHLY_PASSWORD or stdin)
    Login {
        emp_id: String,
        #[arg(long)]
        password: Option<String>,
    },

    /// End the current session
    Logout,

    /// Show the logged-in user and their permissions
    Whoami,

    /// Manage associate accounts (admin only)
    Users {
        #[command(subcommand)]
        action: UsersCommand,
    },

    /// Manage the AI API key in the OS keyring
    ApiKey {
        #[command(subcommand)]
        action: ApiKeyCommand,
    },

    /// Show or change application settings
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum UsersCommand {
    List,
    Add {
        emp_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
        /// Views the associate may open, comma separated
        #[arg(long = "permit", value_delimiter = ',', required = true)]
        permissions: Vec<MainView>,
    },
    Update {
        emp_id: String,
        /// Move the account to a new employee id
        #[arg(long)]
        new_emp_id: Option<String>,
        #[arg(long)]
        name: Option<String>,
        /// Leave unset to keep the current password
        #[arg(long)]
        password: Option<String>,
        #[arg(long = "permit", value_delimiter = ',')]
        permissions: Option<Vec<MainView>>,
    },
    Delete {
        emp_id: String,
    },
}

#[derive(Subcommand)]
pub enum ApiKeyCommand {
    /// Store a key; read from stdin when omitted
    Set { key: Option<String> },
    Clear,
    Status,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    Show,
    /// Set the tab identifier (gid) backing a domain
    SetTab { domain: Domain, tab_id: String },
    /// Set the spreadsheet CSV export URL
    SetUrl { url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RangeArg {
    #[default]
    All,
    Today,
    Last7,
    Last30,
    Month,
    Custom,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    #[arg(long, value_enum, default_value_t = RangeArg::All)]
    pub range: RangeArg,
    /// Start of a custom range (YYYY-MM-DD); implies --range custom
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// End of a custom range (YYYY-MM-DD); implies --range custom
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

impl RangeArgs {
    pub fn date_range(&self) -> DateRange {
        if self.from.is_some() || self.to.is_some() {
            return DateRange::Custom {
                start: self.from,
                end: self.to,
            };
        }
        match self.range {
            RangeArg::All => DateRange::All,
            RangeArg::Today => DateRange::Today,
            RangeArg::Last7 => DateRange::Last7Days,
            RangeArg::Last30 => DateRange::Last30Days,
            RangeArg::Month => DateRange::ThisMonth,
            RangeArg::Custom => DateRange::Custom { start: None, end: None },
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[command(flatten)]
    pub range: RangeArgs,
    /// Case- and accent-insensitive match against any cell
    #[arg(long)]
    pub search: Option<String>,
    /// Social media source tab
    #[arg(long, value_enum, default_value_t = SocialSource::All)]
    pub source: SocialSource,
    #[arg(long)]
    pub team: Option<String>,
    #[arg(long)]
    pub owner: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
}

impl FilterArgs {
    /// Team, owner and status selectors exist only on the priority-thread view.
    pub fn record_filter(&self, domain: Domain) -> Result<RecordFilter, CliError> {
        if domain != Domain::Important {
            let flags = [("--team", &self.team), ("--owner", &self.owner), ("--status", &self.status)];
            if let Some((flag, _)) = flags.iter().find(|(_, v)| v.is_some()) {
                return Err(CliError::InvalidArgument(format!(
                    "{} is only available for the important view",
                    flag
                )));
            }
        }
        Ok(RecordFilter {
            search: self.search.clone(),
            range: self.range.date_range(),
            source: self.source,
            team: self.team.clone(),
            owner: self.owner.clone(),
            status: self.status.clone(),
            summary_window: false,
        })
    }
}

fn auth_service(settings: &AppSettings) -> Result<AuthService<SqliteUserRepository>, CliError> {
    let path = settings.resolved_store_path()?;
    Ok(AuthService::new(SqliteUserRepository::open(&path)?))
}

pub async fn run(command: Commands, settings: AppSettings) -> Result<(), CliError> {
    match command {
        Commands::Sync { domain } => {
            dashboard::sync(&settings, &auth_service(&settings)?, domain).await
        }
        Commands::View { domain, filters, json } => {
            dashboard::view(&settings, &auth_service(&settings)?, domain, &filters, json).await
        }
        Commands::Summary { range, json } => {
            dashboard::summary(&settings, &auth_service(&settings)?, &range, json).await
        }
        Commands::Parse { file, sheet_id, json } => parse_file::run(&file, &sheet_id, json),
        Commands::Export { domain, out, filters } => {
            dashboard::export(&settings, &auth_service(&settings)?, domain, &out, &filters).await
        }
        Commands::Login { emp_id, password } => {
            session::login(&auth_service(&settings)?, &emp_id, password)
        }
        Commands::Logout => session::logout(&auth_service(&settings)?),
        Commands::Whoami => session::whoami(&auth_service(&settings)?),
        Commands::Users { action } => users::run(&auth_service(&settings)?, action),
        Commands::ApiKey { action } => api_key::run(action),
        Commands::Config { action } => config::run(settings, action),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_and_to_imply_custom_range() {
        let cli = Cli::try_parse_from(["dashly", "view", "legal", "--from", "2024-01-01"])
            .expect("parse");
        let Commands::View { domain, filters, .. } = cli.command else {
            panic!("expected view");
        };
        assert_eq!(domain, Domain::Legal);
        assert_eq!(
            filters.range.date_range(),
            DateRange::Custom {
                start: NaiveDate::from_ymd_opt(2024, 1, 1),
                end: None
            }
        );
    }

    #[test]
    fn test_filter_flags() {
        let cli = Cli::try_parse_from([
            "dashly", "export", "social", "out.csv", "--range", "last7", "--source", "board",
            "--search", "refund",
        ])
        .expect("parse");
        let Commands::Export { domain, filters, .. } = cli.command else {
            panic!("expected export");
        };
        let filter = filters.record_filter(domain).expect("filter");
        assert_eq!(domain, Domain::SocialMedia);
        assert_eq!(filter.range, DateRange::Last7Days);
        assert_eq!(filter.source, SocialSource::Board);
        assert_eq!(filter.search.as_deref(), Some("refund"));
    }

    #[test]
    fn test_thread_selectors_rejected_outside_important() {
        for domain in ["legal", "social"] {
            let cli = Cli::try_parse_from(["dashly", "view", domain, "--status", "Closed"])
                .expect("parse");
            let Commands::View { domain, filters, .. } = cli.command else {
                panic!("expected view");
            };
            assert!(matches!(
                filters.record_filter(domain),
                Err(CliError::InvalidArgument(_))
            ));
        }
        let cli = Cli::try_parse_from([
            "dashly", "view", "important", "--status", "WIP", "--team", "Ops",
        ])
        .expect("parse");
        let Commands::View { domain, filters, .. } = cli.command else {
            panic!("expected view");
        };
        let filter = filters.record_filter(domain).expect("filter");
        assert_eq!(filter.status.as_deref(), Some("WIP"));
        assert_eq!(filter.team.as_deref(), Some("Ops"));
    }

    #[test]
    fn test_users_add_requires_permissions() {
        assert!(Cli::try_parse_from([
            "dashly", "users", "add", "77", "--name", "Asha", "--password", "pw"
        ])
        .is_err());
        let cli = Cli::try_parse_from([
            "dashly", "users", "add", "77", "--name", "Asha", "--password", "pw", "--permit",
            "proxy,legal",
        ])
        .expect("parse");
        let Commands::Users {
            action: UsersCommand::Add { permissions, .. },
        } = cli.command
        else {
            panic!("expected users add");
        };
        assert_eq!(permissions, vec![MainView::Proxy, MainView::Legal]);
    }
}
