use std::path::PathBuf;

use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};

use kutub_lib::nav;
use kutub_lib::session::{Storage, Clock, DEFAULT_TTL_HOURS};
use kutub_api::catalog::{Authors, Categories, Languages, Departments};
use kutub_api::org::{Faculties, Educations, TredTypes, FacultyGroups};
use kutub_api::client::ApiClient;
use kutub_api::client::dashboard::QueryDashboard;

use crate::error::{self, Context};
use crate::formatting::datetime_to_string;
use crate::input;
use crate::state::AppState;

mod resource;
mod books;
mod org;
mod admin;

/// a cli for administering a kutub library server.
///
/// manages the book catalog, the university structure, staff accounts and
/// their permissions. if no command is provided then it will enter
/// interactive mode.
#[derive(Debug, Parser)]
struct Cli {
    /// file that stores the session token and group memberships
    ///
    /// if a file is not specified then it will attempt to load
    /// "kutub_session.json" in the current working directory
    #[arg(long)]
    session: Option<PathBuf>,

    /// host name of server
    ///
    /// will be used in a url so the value must be valid for the hostname part
    /// of a url. examples: example.com | 10.0.0.2 | [fd34::2]
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// port of server
    ///
    /// if no port is provided it will default to 80 (http) or 443 (https)
    #[arg(short, long)]
    port: Option<u16>,

    /// to use https
    #[arg(short, long)]
    secure: bool,

    /// hours a new login stays valid
    #[arg(long, default_value_t = DEFAULT_TTL_HOURS)]
    ttl_hours: i64,

    #[command(subcommand)]
    command: Option<BaseCmds>
}

pub fn start() -> error::Result {
    let args = Cli::parse();

    let session_file = if let Some(arg) = args.session {
        arg
    } else {
        let mut current_dir = std::env::current_dir()?;
        current_dir.push("kutub_session.json");
        current_dir
    };

    let ttl = session_ttl(args.ttl_hours)?;

    let mut client_builder = ApiClient::builder();
    client_builder.secure(args.secure);
    client_builder.port(args.port);

    if let Some(host) = args.host {
        client_builder.host(host);
    }

    let client = client_builder.build().context("failed to create api client")?;
    let mut state = AppState::load(client, session_file, ttl)?;

    match args.command {
        Some(cmd) => handle(&mut state, cmd),
        None => Interactive::handle(&mut state)
    }
}

fn session_ttl(hours: i64) -> error::Result<Duration> {
    if hours <= 0 {
        return Err(error::Error::from("--ttl-hours must be greater than 0"));
    }

    let ttl = Duration::try_hours(hours).context("--ttl-hours is too large")?;

    Utc::now().checked_add_signed(ttl).context("--ttl-hours is too large")?;

    Ok(ttl)
}

#[derive(Debug, Parser)]
enum Interactive {
    #[command(flatten)]
    Base(BaseCmds),
    Quit
}

impl Interactive {
    fn handle<S, C>(state: &mut AppState<S, C>) -> error::Result
    where
        S: Storage,
        C: Clock,
    {
        loop {
            let given = input::read_stdin("> ")?;
            let trimmed = given.trim();

            if trimmed.is_empty() {
                continue;
            }

            let Ok(mut args_list) = shell_words::split(trimmed) else {
                println!("failed to parse command line args");
                continue;
            };

            args_list.insert(0, String::from("kutub"));

            let cmd = match Interactive::try_parse_from(args_list) {
                Ok(c) => c,
                Err(err) => {
                    println!("{}", err);
                    continue;
                }
            };

            let result = match cmd {
                Interactive::Base(cmd) => handle(state, cmd),
                Interactive::Quit => break,
            };

            if let Err(err) = result {
                println!("{}", err);
            }
        }

        Ok(())
    }
}

#[derive(Debug, Subcommand)]
enum BaseCmds {
    /// logs in with a passport id and password
    Login {
        /// prompted for when not given
        passport_id: Option<String>,
    },

    /// drops the stored session
    Logout,

    /// shows the current session and resolved permissions
    Status,

    /// shows library totals
    Dashboard,

    /// lists the menu entries available to the current user
    Menu,

    /// manages books
    Book(books::BookArgs),

    /// manages book authors
    Author(books::NamedArgs),

    /// manages book categories
    Category(books::NamedArgs),

    /// manages book languages
    Language(books::NamedArgs),

    /// manages faculties
    Faculty(org::TitledArgs),

    /// manages forms of education
    Education(org::TitledArgs),

    /// manages training types
    Tredtype(org::TitledArgs),

    /// manages faculty groups
    FacultyGroup(org::TitledArgs),

    /// manages departments
    Department(books::NamedArgs),

    /// manages directions of study
    Direction(org::DirectionArgs),

    /// manages student groups
    Group(org::GroupArgs),

    /// lists students, narrowed by department, direction and group
    Students(org::StudentsArgs),

    /// manages staff accounts
    Staff(admin::StaffArgs),

    /// manages roles
    Role(admin::RoleArgs),

    /// manages permissions
    Permission(admin::PermissionArgs),

    /// grants or removes permissions for roles
    RolePermission(admin::RolePermissionArgs),
}

fn handle<S, C>(state: &mut AppState<S, C>, command: BaseCmds) -> error::Result
where
    S: Storage,
    C: Clock,
{
    match command {
        BaseCmds::Login { passport_id } => login(state, passport_id),
        BaseCmds::Logout => logout(state),
        BaseCmds::Status => status(state),
        BaseCmds::Dashboard => dashboard(state),
        BaseCmds::Menu => menu(state),
        BaseCmds::Book(given) => books::handle(state, given),
        BaseCmds::Author(given) => books::handle_named::<Authors, S, C>(state, given),
        BaseCmds::Category(given) => books::handle_named::<Categories, S, C>(state, given),
        BaseCmds::Language(given) => books::handle_named::<Languages, S, C>(state, given),
        BaseCmds::Faculty(given) => org::handle_titled::<Faculties, S, C>(state, given),
        BaseCmds::Education(given) => org::handle_titled::<Educations, S, C>(state, given),
        BaseCmds::Tredtype(given) => org::handle_titled::<TredTypes, S, C>(state, given),
        BaseCmds::FacultyGroup(given) => org::handle_titled::<FacultyGroups, S, C>(state, given),
        BaseCmds::Department(given) => books::handle_named::<Departments, S, C>(state, given),
        BaseCmds::Direction(given) => org::direction(state, given),
        BaseCmds::Group(given) => org::group(state, given),
        BaseCmds::Students(given) => org::students(state, given),
        BaseCmds::Staff(given) => admin::staff(state, given),
        BaseCmds::Role(given) => admin::role(state, given),
        BaseCmds::Permission(given) => admin::permission(state, given),
        BaseCmds::RolePermission(given) => admin::role_permission(state, given),
    }
}

fn login<S, C>(state: &mut AppState<S, C>, passport_id: Option<String>) -> error::Result
where
    S: Storage,
    C: Clock,
{
    let passport_id = match passport_id {
        Some(given) => given,
        None => input::read_stdin_trimmed("passport id: ")?,
    };
    let password = input::read_password()?;

    let expiry = state.login(passport_id, password)?;

    state.refresh_permissions();

    println!("logged in until {}", datetime_to_string(&expiry));

    Ok(())
}

fn logout<S, C>(state: &mut AppState<S, C>) -> error::Result
where
    S: Storage,
    C: Clock,
{
    state.logout()?;

    println!("logged out");

    Ok(())
}

fn status<S, C>(state: &mut AppState<S, C>) -> error::Result
where
    S: Storage,
    C: Clock,
{
    if let Err(err) = state.check_session() {
        println!("{}", err);

        return Ok(());
    }

    if let Some(expiry) = state.session.expires_at() {
        println!("session valid until {}", datetime_to_string(&expiry));
    }

    let memberships = state.memberships();
    let groups: Vec<&str> = memberships.iter().map(|id| id.as_str()).collect();

    println!("groups: {}", groups.join(", "));

    if nav::is_admin(&memberships) {
        println!("administrator");
    }

    if let Some(role) = state.session.selected_role() {
        println!("selected role: {}", role);
    }

    state.refresh_permissions();

    let codes = state.resolver.codes();

    if codes.is_empty() {
        println!("no permissions resolved");
    } else {
        println!("permissions: {}", codes.join(", "));
    }

    if let Some(header) = state.client.permission() {
        println!("request permission: {}", header);
    }

    Ok(())
}

fn dashboard<S, C>(state: &mut AppState<S, C>) -> error::Result
where
    S: Storage,
    C: Clock,
{
    state.authorize()?;

    let metrics = QueryDashboard::new()
        .send(&state.client)?
        .into_payload();

    println!("{:#}", metrics);

    Ok(())
}

fn menu<S, C>(state: &mut AppState<S, C>) -> error::Result
where
    S: Storage,
    C: Clock,
{
    state.authorize()?;

    let tables = state.resolver.tables();
    let memberships = state.memberships();

    for section in nav::visible_menu(&tables, &memberships) {
        println!("{}", section.name);

        for item in section.items {
            println!("    {:<24} {}", item.name, item.path);
        }
    }

    Ok(())
}
