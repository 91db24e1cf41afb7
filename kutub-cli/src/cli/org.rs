use clap::{Subcommand, Args};

use kutub_lib::ids::Id;
use kutub_lib::or_no_data;
use kutub_lib::filter::{FilterChain, chain};
use kutub_lib::session::{Storage, Clock};
use kutub_api::org::{
    Faculties,
    Educations,
    TredTypes,
    FacultyGroups,
    FacultyBody,
    Directions,
    DirectionBody,
    StudentGroups,
    StudentGroupBody,
};
use kutub_api::users::Students;
use kutub_api::resource::{CreateResource, UpdateResource, DeleteResource};

use crate::cli::resource::{self, Listing, DeleteArgs};
use crate::error;
use crate::formatting::{TextTable, Column, PRETTY_OPTIONS};
use crate::state::AppState;

macro_rules! titled_listing {
    ($marker:ty, $route:expr) => {
        impl Listing for $marker {
            const ROUTE: Option<&'static str> = $route;

            fn columns() -> Vec<Column> {
                vec![Column::new("id"), Column::new("title")]
            }

            fn row(item: &Self::Item) -> Vec<String> {
                vec![item.id.to_string(), item.title.clone()]
            }
        }
    };
}

titled_listing!(Faculties, None);
titled_listing!(Educations, None);
titled_listing!(TredTypes, None);
titled_listing!(FacultyGroups, None);

impl Listing for Directions {
    const ROUTE: Option<&'static str> = Some("/direction");

    fn columns() -> Vec<Column> {
        vec![Column::right("id"), Column::new("name"), Column::right("department")]
    }

    fn row(item: &Self::Item) -> Vec<String> {
        vec![
            item.id.to_string(),
            item.name.clone(),
            or_no_data(item.kafedra_id.as_ref().map(|id| id.as_str())).to_owned(),
        ]
    }
}

impl Listing for StudentGroups {
    const ROUTE: Option<&'static str> = Some("/student_group");

    fn columns() -> Vec<Column> {
        vec![Column::right("id"), Column::new("name"), Column::right("direction")]
    }

    fn row(item: &Self::Item) -> Vec<String> {
        vec![
            item.id.to_string(),
            item.name.clone(),
            or_no_data(item.yonalish_id.as_ref().map(|id| id.as_str())).to_owned(),
        ]
    }
}

impl Listing for Students {
    const ROUTE: Option<&'static str> = Some("/users-all");

    fn columns() -> Vec<Column> {
        vec![
            Column::right("id"),
            Column::new("full name"),
            Column::new("phone"),
            Column::new("department"),
            Column::new("direction"),
            Column::new("group"),
        ]
    }

    fn row(item: &Self::Item) -> Vec<String> {
        let (department, direction, group) = match chain(item) {
            Some((d, y, g)) => (d.name.as_str(), y.name.as_str(), g.name.as_str()),
            None => ("", "", ""),
        };

        vec![
            item.id.to_string(),
            item.full_name.clone(),
            or_no_data(item.phone.as_deref()).to_owned(),
            or_no_data(Some(department)).to_owned(),
            or_no_data(Some(direction)).to_owned(),
            or_no_data(Some(group)).to_owned(),
        ]
    }
}

#[derive(Debug, Args)]
pub struct TitledArgs {
    #[command(subcommand)]
    command: Option<TitledCmds>,
}

#[derive(Debug, Subcommand)]
enum TitledCmds {
    /// lists every record
    Get,

    /// creates a new record
    Create {
        #[arg(long)]
        title: String,
    },

    /// renames a record
    Update {
        #[arg(long)]
        id: Id,

        #[arg(long)]
        title: String,
    },

    /// deletes a record
    Delete(DeleteArgs),
}

/// shared handler for the faculty service collections that only carry a title
pub fn handle_titled<R, S, C>(state: &mut AppState<S, C>, args: TitledArgs) -> error::Result
where
    R: Listing
        + CreateResource<Create = FacultyBody>
        + UpdateResource<Update = FacultyBody>
        + DeleteResource,
    S: Storage,
    C: Clock,
{
    match args.command.unwrap_or(TitledCmds::Get) {
        TitledCmds::Get => resource::get::<R, S, C>(state),
        TitledCmds::Create { title } => {
            resource::create::<R, S, C>(state, FacultyBody { title })
        },
        TitledCmds::Update { id, title } => {
            resource::update::<R, S, C>(state, id, FacultyBody { title })
        },
        TitledCmds::Delete(given) => {
            resource::delete::<R, S, C>(state, given.id, given.yes).map(|_| ())
        },
    }
}

#[derive(Debug, Args)]
pub struct DirectionArgs {
    #[command(subcommand)]
    command: Option<DirectionCmds>,
}

#[derive(Debug, Subcommand)]
enum DirectionCmds {
    /// lists every direction
    Get,

    /// creates a direction under a department
    Create {
        #[arg(long)]
        name: String,

        /// id of the owning department
        #[arg(long)]
        department: Id,
    },

    /// updates a direction
    Update {
        #[arg(long)]
        id: Id,

        #[arg(long)]
        name: String,

        /// id of the owning department
        #[arg(long)]
        department: Id,
    },

    /// deletes a direction
    Delete(DeleteArgs),
}

pub fn direction<S, C>(state: &mut AppState<S, C>, args: DirectionArgs) -> error::Result
where
    S: Storage,
    C: Clock,
{
    match args.command.unwrap_or(DirectionCmds::Get) {
        DirectionCmds::Get => resource::get::<Directions, S, C>(state),
        DirectionCmds::Create { name, department } => {
            resource::create::<Directions, S, C>(state, DirectionBody { name, kafedra_id: department })
        },
        DirectionCmds::Update { id, name, department } => {
            resource::update::<Directions, S, C>(state, id, DirectionBody { name, kafedra_id: department })
        },
        DirectionCmds::Delete(given) => {
            resource::delete::<Directions, S, C>(state, given.id, given.yes).map(|_| ())
        },
    }
}

#[derive(Debug, Args)]
pub struct GroupArgs {
    #[command(subcommand)]
    command: Option<GroupCmds>,
}

#[derive(Debug, Subcommand)]
enum GroupCmds {
    /// lists every student group
    Get,

    /// creates a student group under a direction
    Create {
        #[arg(long)]
        name: String,

        /// id of the owning direction
        #[arg(long)]
        direction: Id,
    },

    /// updates a student group
    Update {
        #[arg(long)]
        id: Id,

        #[arg(long)]
        name: String,

        /// id of the owning direction
        #[arg(long)]
        direction: Id,
    },

    /// deletes a student group
    Delete(DeleteArgs),
}

pub fn group<S, C>(state: &mut AppState<S, C>, args: GroupArgs) -> error::Result
where
    S: Storage,
    C: Clock,
{
    match args.command.unwrap_or(GroupCmds::Get) {
        GroupCmds::Get => resource::get::<StudentGroups, S, C>(state),
        GroupCmds::Create { name, direction } => {
            resource::create::<StudentGroups, S, C>(state, StudentGroupBody { name, yonalish_id: direction })
        },
        GroupCmds::Update { id, name, direction } => {
            resource::update::<StudentGroups, S, C>(state, id, StudentGroupBody { name, yonalish_id: direction })
        },
        GroupCmds::Delete(given) => {
            resource::delete::<StudentGroups, S, C>(state, given.id, given.yes).map(|_| ())
        },
    }
}

#[derive(Debug, Args)]
pub struct StudentsArgs {
    /// only students of this department
    #[arg(long)]
    department: Option<Id>,

    /// only students of this direction, needs --department
    #[arg(long, requires = "department")]
    direction: Option<Id>,

    /// only students of this group, needs --direction
    #[arg(long, requires = "direction")]
    group: Option<Id>,

    /// only students whose name contains the text
    #[arg(long)]
    search: Option<String>,

    /// prints the values available for the next filter level
    #[arg(long)]
    options: bool,
}

impl StudentsArgs {
    fn filter(&self) -> FilterChain {
        let mut chain = FilterChain::new();

        chain.select_department(self.department.clone())
            .select_direction(self.direction.clone())
            .select_group(self.group.clone());

        if let Some(search) = &self.search {
            chain.set_search(search.clone());
        }

        chain
    }
}

fn print_options<'a, I>(title: &str, options: I) -> error::Result
where
    I: IntoIterator<Item = (&'a Id, &'a str)>
{
    let mut table = TextTable::with_columns([Column::right("id"), Column::new(title)]);

    for (id, name) in options {
        table.push([id.as_str(), name]);
    }

    if table.is_empty() {
        println!("no {} options", title);
    } else {
        table.print(&PRETTY_OPTIONS)?;
    }

    Ok(())
}

pub fn students<S, C>(state: &mut AppState<S, C>, args: StudentsArgs) -> error::Result
where
    S: Storage,
    C: Clock,
{
    let screen = resource::load::<Students, S, C>(state)?;
    let rows = screen.items();
    let filter = args.filter();

    if args.options {
        if filter.department().is_none() {
            print_options("department", filter.departments(rows).into_iter().map(|d| (&d.id, d.name.as_str())))?;
        } else if filter.direction().is_none() {
            print_options("direction", filter.directions(rows).into_iter().map(|d| (&d.id, d.name.as_str())))?;
        } else {
            print_options("group", filter.groups(rows).into_iter().map(|g| (&g.id, g.name.as_str())))?;
        }

        return Ok(());
    }

    resource::print_items::<Students, _>(filter.apply(rows))
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: StudentsArgs,
    }

    #[test]
    fn filter_from_args() {
        let parsed = Wrapper::try_parse_from([
            "students", "--department", "1", "--direction", "5", "--search", "ali"
        ]).unwrap();

        let chain = parsed.args.filter();

        assert_eq!(chain.department(), Some(&Id::from("1")));
        assert_eq!(chain.direction(), Some(&Id::from("5")));
        assert_eq!(chain.group(), None);
        assert_eq!(chain.search(), "ali");
    }

    #[test]
    fn direction_requires_department() {
        assert!(Wrapper::try_parse_from(["students", "--direction", "5"]).is_err());
    }
}
