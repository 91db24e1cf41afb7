use clap::{Subcommand, Args};

use kutub_lib::ids::Id;
use kutub_lib::or_no_data;
use kutub_lib::session::{Storage, Clock};
use kutub_api::books::{Books, BookBody};
use kutub_api::catalog::{Authors, Categories, Languages, NameBody};
use kutub_api::resource::{CreateResource, UpdateResource, DeleteResource};

use crate::cli::resource::{self, Listing, DeleteArgs};
use crate::error;
use crate::formatting::Column;
use crate::state::AppState;

impl Listing for Books {
    const ROUTE: Option<&'static str> = Some("/books-all");

    fn columns() -> Vec<Column> {
        vec![
            Column::right("id"),
            Column::new("name"),
            Column::right("author"),
            Column::right("year"),
            Column::right("pages"),
            Column::new("code"),
        ]
    }

    fn row(item: &Self::Item) -> Vec<String> {
        vec![
            item.id.to_string(),
            item.name.clone(),
            or_no_data(item.auther_id.as_ref().map(|id| id.as_str())).to_owned(),
            item.year.map(|v| v.to_string()).unwrap_or_default(),
            item.page.map(|v| v.to_string()).unwrap_or_default(),
            or_no_data(item.book_code.as_deref()).to_owned(),
        ]
    }
}

macro_rules! named_listing {
    ($marker:ty, $route:expr) => {
        impl Listing for $marker {
            const ROUTE: Option<&'static str> = $route;

            fn columns() -> Vec<Column> {
                vec![Column::right("id"), Column::new("name")]
            }

            fn row(item: &Self::Item) -> Vec<String> {
                vec![item.id.to_string(), item.name.clone()]
            }
        }
    };
}

named_listing!(Authors, Some("/auther"));
named_listing!(Categories, Some("/categories"));
named_listing!(Languages, Some("/languages"));
named_listing!(kutub_api::catalog::Departments, Some("/kafedra"));

#[derive(Debug, Args)]
pub struct NamedArgs {
    #[command(subcommand)]
    command: Option<NamedCmds>,
}

#[derive(Debug, Subcommand)]
enum NamedCmds {
    /// lists every record
    Get,

    /// creates a new record
    Create {
        /// display name
        #[arg(long)]
        name: String,
    },

    /// renames a record
    Update {
        /// id of the record to update
        #[arg(long)]
        id: Id,

        /// new display name
        #[arg(long)]
        name: String,
    },

    /// deletes a record
    Delete(DeleteArgs),
}

/// shared handler for collections that only carry a name
pub fn handle_named<R, S, C>(state: &mut AppState<S, C>, args: NamedArgs) -> error::Result
where
    R: Listing
        + CreateResource<Create = NameBody>
        + UpdateResource<Update = NameBody>
        + DeleteResource,
    S: Storage,
    C: Clock,
{
    match args.command.unwrap_or(NamedCmds::Get) {
        NamedCmds::Get => resource::get::<R, S, C>(state),
        NamedCmds::Create { name } => resource::create::<R, S, C>(state, NameBody::new(name)),
        NamedCmds::Update { id, name } => resource::update::<R, S, C>(state, id, NameBody::new(name)),
        NamedCmds::Delete(given) => resource::delete::<R, S, C>(state, given.id, given.yes).map(|_| ()),
    }
}

#[derive(Debug, Args)]
pub struct BookArgs {
    #[command(flatten)]
    get: GetArgs,

    #[command(subcommand)]
    command: Option<BookCmds>,
}

#[derive(Debug, Args)]
struct GetArgs {
    /// only show books whose name or code contains the text
    #[arg(long)]
    search: Option<String>,
}

#[derive(Debug, Args)]
struct BookFields {
    /// title of the book
    #[arg(long)]
    name: String,

    /// id of the author
    #[arg(long)]
    author: Id,

    /// year of publication
    #[arg(long)]
    year: i64,

    /// number of pages
    #[arg(long)]
    pages: i64,

    /// library code
    #[arg(long)]
    code: String,
}

impl From<BookFields> for BookBody {
    fn from(fields: BookFields) -> Self {
        BookBody {
            name: fields.name,
            auther_id: fields.author,
            year: fields.year,
            page: fields.pages,
            book_code: fields.code,
        }
    }
}

#[derive(Debug, Subcommand)]
enum BookCmds {
    /// adds a new book
    Create(BookFields),

    /// replaces the details of a book
    Update {
        /// id of the book to update
        #[arg(long)]
        id: Id,

        #[command(flatten)]
        fields: BookFields,
    },

    /// deletes a book
    Delete(DeleteArgs),
}

pub fn handle<S, C>(state: &mut AppState<S, C>, args: BookArgs) -> error::Result
where
    S: Storage,
    C: Clock,
{
    match args.command {
        Some(BookCmds::Create(fields)) => resource::create::<Books, S, C>(state, fields.into()),
        Some(BookCmds::Update { id, fields }) => resource::update::<Books, S, C>(state, id, fields.into()),
        Some(BookCmds::Delete(given)) => resource::delete::<Books, S, C>(state, given.id, given.yes).map(|_| ()),
        None => get(state, args.get),
    }
}

fn get<S, C>(state: &mut AppState<S, C>, args: GetArgs) -> error::Result
where
    S: Storage,
    C: Clock,
{
    let screen = resource::load::<Books, S, C>(state)?;
    let term = args.search.unwrap_or_default();

    resource::print_items::<Books, _>(
        screen.items().iter().filter(|book| book.matches_search(&term))
    )
}
