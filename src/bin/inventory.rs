// Copyright (c) 2026 Inventory Dashboard Developers. All Rights Reserved.

//! A terminal front end for the inventory dashboard.

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate tracing;

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tokio::runtime::current_thread::Runtime;
use tracing_subscriber::EnvFilter;

use inventory::api::fetch_backend_config;
use inventory::dashboard::{Dashboard, FilterCriteria, Screen, SessionState, XlsxExport};
use inventory::model::InventoryId;
use inventory::session::{FileStore, SystemClock};
use inventory::{BackendConfig, Config, Inventory};

#[derive(Parser)]
#[command(name = "inventory", about = "Browse and export the server inventory")]
struct Cli {
    /// Read backend settings from a running config provider, e.g. http://localhost:3000
    #[arg(long, env = "INVENTORY_FRONTEND")]
    frontend: Option<String>,

    #[arg(long, env = "BACKEND_PROTOCOL", default_value = "http")]
    backend_protocol: String,

    #[arg(long, env = "BACKEND_HOST", default_value = "localhost")]
    backend_host: String,

    #[arg(long, env = "BACKEND_PORT", default_value = "5001")]
    backend_port: String,

    /// Where the session is kept between invocations
    #[arg(long, env = "INVENTORY_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in; missing credentials are prompted for
    Login {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logoff,
    /// Show whether a valid session is stored
    Status,
    /// List inventory records
    List(FilterArgs),
    /// Show the details of one record
    Show { id: String },
    /// Write the inventory table to a spreadsheet
    Export {
        #[arg(long, short, default_value = "inventory.xlsx")]
        output: PathBuf,
        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[derive(Args)]
struct FilterArgs {
    #[arg(long, default_value = "")]
    servername: String,
    #[arg(long, default_value = "")]
    os: String,
    #[arg(long = "app-id", default_value = "")]
    application_id: String,
    #[arg(long = "env", default_value = "")]
    environment: String,
}

impl FilterArgs {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(
            &self.servername,
            &self.os,
            &self.application_id,
            &self.environment,
        )
    }
}

fn default_session_file() -> PathBuf {
    let home = env::var_os("HOME").map(PathBuf::from).unwrap_or_default();
    home.join(".inventory").join("session.json")
}

fn prompt(label: &str) -> inventory::Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{}: ", label)?;
    stdout.flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

fn render(screen: &Screen) {
    if screen.login_error_visible {
        eprintln!("Login failed. Please check your credentials.");
    }
    if !screen.dashboard_visible {
        println!("Not logged in. Run `inventory login` first.");
        return;
    }

    let mut table = comfy_table::Table::new();
    table.set_header(screen.table.headers().to_vec());
    for row in screen.table.visible_rows() {
        table.add_row(
            row.cells()
                .iter()
                .map(|cell| cell.text().to_string())
                .collect::<Vec<_>>(),
        );
    }
    println!("{}", table);
}

// Every invocation that needs data starts the way a page load does.
fn page_load(rt: &mut Runtime, dashboard: &Dashboard) -> inventory::Result<SessionState> {
    rt.block_on(dashboard.check_login_status())
}

fn run() -> inventory::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("inventory=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut rt = Runtime::new()?;

    let backend = match cli.frontend {
        Some(ref frontend) => rt.block_on(fetch_backend_config(frontend.parse()?))?,
        None => BackendConfig::new(
            cli.backend_protocol.as_str(),
            cli.backend_host.as_str(),
            cli.backend_port.as_str(),
        ),
    };
    debug!("backend: {:?}", backend);

    let client = Inventory::new(Config::new(backend))?;
    let store = FileStore::open(cli.session_file.clone().unwrap_or_else(default_session_file))?;
    let dashboard = Dashboard::new(client.clone(), SystemClock, store);

    match cli.command {
        Command::Logoff => {
            dashboard.logoff()?;
            println!("Logged off.");
        }
        Command::Login {
            ref username,
            ref password,
        } => {
            let username = match *username {
                Some(ref username) => username.clone(),
                None => prompt("Username")?,
            };
            let password = match *password {
                Some(ref password) => password.clone(),
                None => prompt("Password")?,
            };
            let state = rt.block_on(dashboard.login(&username, &password))?;
            render(&dashboard.screen());
            if state != SessionState::LoggedIn {
                bail!("login failed");
            }
        }
        Command::Status => {
            let state = page_load(&mut rt, &dashboard)?;
            match dashboard.session() {
                Some(ref session) if state == SessionState::LoggedIn => {
                    println!("Logged in until {}", session.expires_at().to_rfc3339());
                }
                _ => println!("Logged out."),
            }
        }
        Command::List(ref filter) => {
            if page_load(&mut rt, &dashboard)? == SessionState::LoggedIn {
                dashboard.filter(&filter.criteria());
            }
            render(&dashboard.screen());
        }
        Command::Show { ref id } => {
            let state = page_load(&mut rt, &dashboard)?;
            match dashboard.session() {
                Some(ref session) if state == SessionState::LoggedIn => {
                    client.set_access_token(Some(session.token().clone()));
                    let record =
                        rt.block_on(client.get_inventory_by_id(InventoryId::new(id.as_str())))?;
                    println!("ID:             {}", record.id());
                    println!("Server Name:    {}", record.servername());
                    println!("OS:             {}", record.os());
                    println!("Environment:    {}", record.environment());
                    println!("Application ID: {}", record.application_id());
                }
                _ => render(&dashboard.screen()),
            }
        }
        Command::Export {
            ref output,
            ref filter,
        } => {
            if page_load(&mut rt, &dashboard)? != SessionState::LoggedIn {
                render(&dashboard.screen());
                return Ok(());
            }
            let shown = dashboard.filter(&filter.criteria());
            let rows = dashboard.screen().table.rows().len();
            dashboard.export(&XlsxExport::new(output.clone()))?;
            println!(
                "Exported {} rows ({} matching the filter) to {}",
                rows,
                shown,
                output.display()
            );
        }
    }

    Ok(())
}

quick_main!(run);
