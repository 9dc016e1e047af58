//! Command-line parsing and dispatch.

use std::collections::HashMap;

use anyhow::{anyhow, bail, Context};
use chrono::Utc;
use mf360_core::backend::{LoginRequest, SignupRequest};
use mf360_core::constants::FILTER_ALL;
use mf360_core::dashboard::{DashboardServiceTrait, DASHBOARD_LOAD_FAILED, SEED_FAILED};
use mf360_core::insights::{InsightsServiceTrait, ANALYSIS_FAILED};
use mf360_core::investors::{
    DetailOutcome, InvestorFilter, InvestorForm, InvestorsServiceTrait, CREATE_FAILED,
    DELETE_FAILED, INVESTORS_LOAD_FAILED, UPDATE_FAILED,
};
use mf360_core::session::{
    AuthServiceTrait, LOGIN_FAILED, LOGIN_SUCCEEDED, SIGNUP_FAILED, SIGNUP_SUCCEEDED,
};
use mf360_core::transactions::{export_filename, SortKey, TransactionTable};
use mf360_core::Error;

use crate::config::Config;
use crate::main_lib::AppContext;
use crate::render;

pub const USAGE: &str = "\
Usage: mf360 <command> [options]

Commands:
  login <email> <password>
  signup <name> <email> <password>
  logout
  whoami
  dashboard
  seed
  investors [--search TEXT] [--risk Low|Moderate|High]
  investor <id> [--search TEXT] [--type TYPE] [--sort COLUMN]... [--page N]
  export <id> [--search TEXT] [--type TYPE] [--sort COLUMN]...
  create --name N --email E --mobile M --pan P [--risk R] [--investor-type T]
  update <id> [--name N] [--email E] [--mobile M] [--pan P] [--risk R] [--investor-type T]
  delete <id>
  insights
  analyze <id>
  summary <id>
  help

Sort columns: txn_date, txn_id, txn_type, txn_amount, nav_at_txn, units,
scheme_name, amc_name. Repeating --sort on the same column flips it to
descending.";

/// Table controls shared by `investor` and `export`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableOptions {
    pub search: Option<String>,
    pub txn_type: Option<String>,
    pub sorts: Vec<SortKey>,
    pub page: Option<usize>,
}

impl TableOptions {
    pub fn apply(&self, table: &mut TransactionTable) {
        if let Some(search) = &self.search {
            table.set_search(search.clone());
        }
        if let Some(txn_type) = &self.txn_type {
            table.set_type_filter(txn_type.clone());
        }
        for key in &self.sorts {
            table.request_sort(*key);
        }
        if let Some(page) = self.page {
            table.go_to_page(page);
        }
    }
}

/// Form fields given on the command line; unset fields keep their value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub pan: Option<String>,
    pub risk_profile: Option<String>,
    pub investor_type: Option<String>,
}

impl FormFields {
    pub fn apply(&self, form: &mut InvestorForm) {
        if let Some(name) = &self.name {
            form.name = name.clone();
        }
        if let Some(email) = &self.email {
            form.email = email.clone();
        }
        if let Some(mobile) = &self.mobile {
            form.mobile = mobile.clone();
        }
        if let Some(pan) = &self.pan {
            form.set_pan(pan);
        }
        if let Some(risk) = &self.risk_profile {
            form.risk_profile = risk.clone();
        }
        if let Some(investor_type) = &self.investor_type {
            form.investor_type = investor_type.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Login { email: String, password: String },
    Signup { name: String, email: String, password: String },
    Logout,
    WhoAmI,
    Dashboard,
    Seed,
    Investors { search: String, risk: Option<String> },
    Investor { id: String, table: TableOptions },
    Export { id: String, table: TableOptions },
    Create { fields: FormFields },
    Update { id: String, fields: FormFields },
    Delete { id: String },
    Insights,
    Analyze { id: String },
    Summary { id: String },
}

/// Positional arguments plus `--flag value` options.
struct ParsedArgs {
    positional: Vec<String>,
    options: HashMap<String, Vec<String>>,
}

impl ParsedArgs {
    fn parse(args: Vec<String>) -> anyhow::Result<Self> {
        let mut positional = Vec::new();
        let mut options: HashMap<String, Vec<String>> = HashMap::new();
        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            if let Some(flag) = arg.strip_prefix("--") {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("Missing value for --{}", flag))?;
                options.entry(flag.to_string()).or_default().push(value);
            } else {
                positional.push(arg);
            }
        }
        Ok(Self {
            positional,
            options,
        })
    }

    fn positional(&self, index: usize, name: &str) -> anyhow::Result<String> {
        self.positional
            .get(index)
            .cloned()
            .ok_or_else(|| anyhow!("Missing <{}>\n\n{}", name, USAGE))
    }

    fn last(&self, flag: &str) -> Option<String> {
        self.options.get(flag).and_then(|v| v.last().cloned())
    }

    fn all(&self, flag: &str) -> Vec<String> {
        self.options.get(flag).cloned().unwrap_or_default()
    }

    fn table_options(&self) -> anyhow::Result<TableOptions> {
        let sorts = self
            .all("sort")
            .iter()
            .map(|s| s.parse::<SortKey>().map_err(|e| anyhow!(e)))
            .collect::<anyhow::Result<Vec<_>>>()?;
        let page = match self.last("page") {
            Some(p) => Some(
                p.parse::<usize>()
                    .with_context(|| format!("Invalid page number: {}", p))?,
            ),
            None => None,
        };
        Ok(TableOptions {
            search: self.last("search"),
            txn_type: self.last("type"),
            sorts,
            page,
        })
    }

    fn form_fields(&self) -> FormFields {
        FormFields {
            name: self.last("name"),
            email: self.last("email"),
            mobile: self.last("mobile"),
            pan: self.last("pan"),
            risk_profile: self.last("risk"),
            investor_type: self.last("investor-type"),
        }
    }
}

impl Command {
    pub fn parse(args: Vec<String>) -> anyhow::Result<Self> {
        let mut args = args.into_iter();
        let name = match args.next() {
            Some(name) => name,
            None => return Ok(Command::Help),
        };
        let rest = ParsedArgs::parse(args.collect())?;

        let command = match name.as_str() {
            "help" | "--help" | "-h" => Command::Help,
            "login" => Command::Login {
                email: rest.positional(0, "email")?,
                password: rest.positional(1, "password")?,
            },
            "signup" => Command::Signup {
                name: rest.positional(0, "name")?,
                email: rest.positional(1, "email")?,
                password: rest.positional(2, "password")?,
            },
            "logout" => Command::Logout,
            "whoami" => Command::WhoAmI,
            "dashboard" => Command::Dashboard,
            "seed" => Command::Seed,
            "investors" => Command::Investors {
                search: rest.last("search").unwrap_or_default(),
                risk: rest.last("risk"),
            },
            "investor" => Command::Investor {
                id: rest.positional(0, "id")?,
                table: rest.table_options()?,
            },
            "export" => Command::Export {
                id: rest.positional(0, "id")?,
                table: rest.table_options()?,
            },
            "create" => Command::Create {
                fields: rest.form_fields(),
            },
            "update" => Command::Update {
                id: rest.positional(0, "id")?,
                fields: rest.form_fields(),
            },
            "delete" => Command::Delete {
                id: rest.positional(0, "id")?,
            },
            "insights" => Command::Insights,
            "analyze" => Command::Analyze {
                id: rest.positional(0, "id")?,
            },
            "summary" => Command::Summary {
                id: rest.positional(0, "id")?,
            },
            other => bail!("Unknown command: {}\n\n{}", other, USAGE),
        };
        Ok(command)
    }

    fn requires_session(&self) -> bool {
        !matches!(
            self,
            Command::Help | Command::Login { .. } | Command::Signup { .. } | Command::Logout
        )
    }
}

/// Converts a core error into the notification text shown to the user.
fn notify(err: Error, fallback: &str) -> anyhow::Error {
    tracing::debug!("{}: {:?}", fallback, err);
    anyhow!(err.user_message(fallback))
}

pub async fn run(app: &AppContext, config: &Config, command: Command) -> anyhow::Result<()> {
    if command.requires_session() && !app.session.is_authenticated() {
        bail!("Not signed in. Run `mf360 login <email> <password>` first.");
    }

    match command {
        Command::Help => println!("{}", USAGE),

        Command::Login { email, password } => {
            let user = app
                .auth
                .login(LoginRequest { email, password })
                .await
                .map_err(|e| notify(e, LOGIN_FAILED))?;
            render::print_success(LOGIN_SUCCEEDED);
            println!("Signed in as {}", user.display_name());
        }

        Command::Signup {
            name,
            email,
            password,
        } => {
            let user = app
                .auth
                .signup(SignupRequest {
                    email,
                    password,
                    name,
                })
                .await
                .map_err(|e| notify(e, SIGNUP_FAILED))?;
            render::print_success(SIGNUP_SUCCEEDED);
            println!("Signed in as {}", user.display_name());
        }

        Command::Logout => {
            app.auth.logout()?;
            println!("Signed out");
        }

        Command::WhoAmI => {
            if let Some(user) = app.session.current() {
                println!("{} <{}>", user.display_name(), user.email);
            }
        }

        Command::Dashboard => {
            let loaded = app
                .dashboard
                .load_dashboard()
                .await
                .map_err(|e| notify(e, DASHBOARD_LOAD_FAILED))?;
            render::print_notices(&loaded.notices);
            print!("{}", render::dashboard(&loaded.data));
        }

        Command::Seed => {
            let loaded = app
                .dashboard
                .seed_database()
                .await
                .map_err(|e| notify(e, SEED_FAILED))?;
            render::print_notices(&loaded.notices);
            let dashboard = app
                .dashboard
                .load_dashboard()
                .await
                .map_err(|e| notify(e, DASHBOARD_LOAD_FAILED))?;
            render::print_notices(&dashboard.notices);
            print!("{}", render::dashboard(&dashboard.data));
        }

        Command::Investors { search, risk } => {
            let filter = InvestorFilter::new(search, risk.filter(|r| r != FILTER_ALL));
            let investors = app
                .investors
                .list_investors(&filter)
                .await
                .map_err(|e| notify(e, INVESTORS_LOAD_FAILED))?;
            print!("{}", render::investor_list(&investors));
        }

        Command::Investor { id, table } => match app.investors.load_detail(&id).await {
            DetailOutcome::Loaded(detail) => {
                let mut txns = detail.transactions_table();
                table.apply(&mut txns);
                print!("{}", render::investor_detail(&detail));
                print!("{}", render::transactions(&txns));
            }
            DetailOutcome::RedirectToList(notice) => {
                render::print_notices(&[notice]);
                let investors = app
                    .investors
                    .list_investors(&InvestorFilter::default())
                    .await
                    .map_err(|e| notify(e, INVESTORS_LOAD_FAILED))?;
                print!("{}", render::investor_list(&investors));
            }
        },

        Command::Export { id, table } => {
            let detail = match app.investors.load_detail(&id).await {
                DetailOutcome::Loaded(detail) => detail,
                DetailOutcome::RedirectToList(notice) => bail!(notice.message),
            };
            let mut txns = detail.transactions_table();
            table.apply(&mut txns);
            let csv = txns.to_csv().map_err(|e| notify(e, "Export failed"))?;

            std::fs::create_dir_all(&config.export_dir).with_context(|| {
                format!("Failed to create {}", config.export_dir.display())
            })?;
            let path = config.export_dir.join(export_filename(Utc::now()));
            std::fs::write(&path, csv)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "Exported {} transactions to {}",
                txns.filtered_count(),
                path.display()
            );
        }

        Command::Create { fields } => {
            let mut form = InvestorForm::default();
            fields.apply(&mut form);
            let notice = app
                .investors
                .create_investor(&form)
                .await
                .map_err(|e| notify(e, CREATE_FAILED))?;
            render::print_notices(&[notice]);
        }

        Command::Update { id, fields } => {
            let mut form = match app.investors.load_detail(&id).await {
                DetailOutcome::Loaded(detail) => InvestorForm::from_investor(&detail.investor),
                DetailOutcome::RedirectToList(notice) => bail!(notice.message),
            };
            fields.apply(&mut form);
            let notice = app
                .investors
                .update_investor(&id, &form)
                .await
                .map_err(|e| notify(e, UPDATE_FAILED))?;
            render::print_notices(&[notice]);
        }

        Command::Delete { id } => {
            let notice = app
                .investors
                .delete_investor(&id)
                .await
                .map_err(|e| notify(e, DELETE_FAILED))?;
            render::print_notices(&[notice]);
        }

        Command::Insights => {
            let insights = app
                .insights
                .load_aggregate()
                .await
                .map_err(|e| notify(e, INVESTORS_LOAD_FAILED))?;
            print!("{}", render::aggregate_insights(&insights));
        }

        Command::Analyze { id } => {
            let loaded = app
                .insights
                .run_analysis(Some(&id))
                .await
                .map_err(|e| notify(e, ANALYSIS_FAILED))?;
            render::print_notices(&loaded.notices);
            print!(
                "{}",
                render::analysis(&loaded.data.analysis, &loaded.data.summary)
            );
        }

        Command::Summary { id } => {
            match app
                .insights
                .cached_analysis(&id)
                .await
                .map_err(|e| notify(e, ANALYSIS_FAILED))?
            {
                Some(cached) => print!(
                    "{}",
                    render::analysis(&cached.analysis, &cached.ai_summary)
                ),
                None => println!("No analysis stored for {}. Run `mf360 analyze {}`.", id, id),
            }
        }
    }

    Ok(())
}
