use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use fleetview::app::browse::{self, BrowseCommand, Step};
use fleetview::app::pages::{LoginOutcome, RocketTab, RocketsPage, ships};
use fleetview::app::router::{Navigation, Route};
use fleetview::app::{App, Screen};
use fleetview::config::FleetConfig;
use fleetview::core::auth::Credentials;
use fleetview::core::query::QueryState;
use fleetview::core::theme::ThemeMode;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Browse the SpaceX fleet from the terminal
#[derive(Parser)]
#[command(name = "fleetview")]
#[command(about = "Catalog of SpaceX rockets and ships", long_about = None)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Color scheme (overrides the configuration and the remembered choice)
    #[arg(long, global = true)]
    theme: Option<ThemeMode>,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in; any username of 2+ and password of 6+ characters works
    Login {
        username: String,
        password: String,
        /// Path to continue to after signing in
        #[arg(long)]
        from: Option<String>,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Landing view
    Home,
    /// Switch the color scheme; toggles when no mode is given
    Theme { mode: Option<ThemeMode> },
    /// List ships
    Ships {
        /// Filter by name, type or home port
        #[arg(short, long)]
        search: Option<String>,
        /// Sort as FIELD or FIELD:asc|desc
        #[arg(long, default_value = "name")]
        sort: String,
    },
    /// Show one ship
    Ship { id: String },
    /// List rockets
    Rockets {
        #[arg(long, default_value = "all")]
        tab: RocketTab,
    },
    /// Show one rocket
    Rocket {
        id: String,
        /// Image of the carousel to show (1-based)
        #[arg(long, default_value_t = 1)]
        image: usize,
    },
    /// Open any route by path, e.g. /ships/5ea6ed2d080df4000697c901
    Open { path: String },
    /// Interactive listing with search, sort and row selection
    Browse {
        #[arg(value_enum)]
        listing: Listing,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Listing {
    Ships,
    Rockets,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match FleetConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    if let Some(theme) = cli.theme {
        config.theme = Some(theme);
    }
    if cli.no_color {
        config.color = false;
    }

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        1 => EnvFilter::new("fleetview=debug"),
        _ => EnvFilter::new("fleetview=trace,reqwest=debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(cli.verbose >= 2)
        .init();

    debug!(api = %config.api.base_url, theme = ?config.theme, "fleetview started");

    if let Err(e) = run(cli.command, &config).await {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: &FleetConfig) -> anyhow::Result<()> {
    let mut app = App::from_config(config)?;

    match command {
        Commands::Login {
            username,
            password,
            from,
        } => {
            let (outcome, form) = app.login(&Credentials::new(username, password), from)?;
            match outcome {
                LoginOutcome::Success(next) => {
                    let screen = app.open_route(next).await?;
                    print_screen(&app, &screen);
                }
                LoginOutcome::Invalid(errors) => {
                    println!("{}", form.render(app.templates())?);
                    anyhow::bail!("Invalid credentials ({})", errors);
                }
            }
        }
        Commands::Logout => {
            app.logout()?;
            println!("Signed out");
        }
        Commands::Whoami => match app.session().user() {
            Some(user) => println!(
                "{} (signed in {})",
                user.username,
                user.logged_in_at.format("%Y-%m-%d %H:%M UTC")
            ),
            None => println!("Not signed in"),
        },
        Commands::Home => print_screen(&app, &app.open_route(Route::Home).await?),
        Commands::Theme { mode } => {
            let mode = match mode {
                Some(mode) => {
                    app.set_theme_mode(mode)?;
                    mode
                }
                None => app.toggle_theme()?,
            };
            println!("Theme: {}", mode);
        }
        Commands::Ships { search, sort } => {
            let (field, direction) = QueryState::parse_sort(&sort);
            let mut query = ships::initial_query().with_direction(direction);
            query.sort_field = field;
            if let Some(search) = search {
                query = query.with_search(search);
            }
            print_screen(&app, &app.ships(query).await?);
        }
        Commands::Ship { id } => print_screen(&app, &app.open_route(Route::ShipDetail(id)).await?),
        Commands::Rockets { tab } => print_screen(&app, &app.rockets(tab).await?),
        Commands::Rocket { id, image } => {
            print_screen(&app, &app.rocket(&id, image.saturating_sub(1)).await?)
        }
        Commands::Open { path } => print_screen(&app, &app.open(&path).await?),
        Commands::Browse { listing } => browse_listing(&mut app, listing).await?,
    }

    Ok(())
}

fn print_screen(app: &App, screen: &Screen) {
    println!("{}", app.compose(screen));
}

async fn prompt(lines: &mut Lines<BufReader<Stdin>>) -> anyhow::Result<Option<String>> {
    print!("> ");
    std::io::stdout().flush().context("Failed to flush stdout")?;
    Ok(lines.next_line().await?)
}

/// Parse a line into a command, printing parse errors
fn parse_line(line: &str) -> Option<BrowseCommand> {
    match BrowseCommand::parse(line) {
        Ok(command) => command,
        Err(message) => {
            println!("{}", message);
            None
        }
    }
}

async fn browse_listing(app: &mut App, listing: Listing) -> anyhow::Result<()> {
    let route = match listing {
        Listing::Ships => Route::Ships,
        Listing::Rockets => Route::Rockets,
    };
    if let Navigation::Redirect { .. } = app.navigate(route.clone()) {
        print_screen(app, &app.open_route(route).await?);
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{}", browse::HELP);

    match listing {
        Listing::Ships => {
            let mut controller = ships::controller();
            ships::load(&mut controller, app.source()).await;
            let mut columns = ships::columns(*app.theme());
            let mut redraw = true;

            loop {
                if redraw {
                    if let Some(notice) = controller.take_notice() {
                        println!("{}", fleetview::app::render::notice_line(app.theme(), &notice));
                    }
                    print!("{}", ships::render(&controller, &mut app.surface()));
                }
                let Some(line) = prompt(&mut lines).await? else { break };
                let Some(command) = parse_line(&line) else {
                    redraw = false;
                    continue;
                };
                redraw = match browse::apply_to_table(command, &mut controller, &columns) {
                    Step::Redraw => true,
                    Step::ToggleTheme => {
                        app.toggle_theme()?;
                        columns = ships::columns(*app.theme());
                        true
                    }
                    Step::Navigate(route) => {
                        print_screen(app, &app.open_route(route).await?);
                        false
                    }
                    Step::Message(message) => {
                        println!("{}", message);
                        false
                    }
                    Step::Quit => break,
                };
            }
        }
        Listing::Rockets => {
            let mut page = RocketsPage::new(RocketTab::All);
            page.load(app.source()).await;
            let mut redraw = true;

            loop {
                if redraw {
                    if let Some(notice) = page.take_notice() {
                        println!("{}", fleetview::app::render::notice_line(app.theme(), &notice));
                    }
                    print!("{}", page.render(app.templates(), app.theme())?);
                }
                let Some(line) = prompt(&mut lines).await? else { break };
                let Some(command) = parse_line(&line) else {
                    redraw = false;
                    continue;
                };
                redraw = match browse::apply_to_rockets(command, &mut page) {
                    Step::Redraw => true,
                    Step::ToggleTheme => {
                        app.toggle_theme()?;
                        true
                    }
                    Step::Navigate(route) => {
                        print_screen(app, &app.open_route(route).await?);
                        false
                    }
                    Step::Message(message) => {
                        println!("{}", message);
                        false
                    }
                    Step::Quit => break,
                };
            }
        }
    }

    Ok(())
}
