use kutub_lib::ids::Id;
use kutub_lib::session::{Storage, Clock};
use kutub_api::resource::{Resource, CreateResource, UpdateResource, DeleteResource};
use kutub_api::client::screen::{ListScreen, ListState};

use crate::error;
use crate::input;
use crate::state::AppState;
use crate::formatting::{TextTable, Column, PRETTY_OPTIONS};

/// how a collection is shown in the terminal
pub trait Listing: Resource {
    /// menu route guarding the collection, `None` when it has no menu entry
    const ROUTE: Option<&'static str> = None;

    fn columns() -> Vec<Column>;

    fn row(item: &Self::Item) -> Vec<String>;
}

fn guard<R, S, C>(state: &mut AppState<S, C>) -> error::Result
where
    R: Listing,
    S: Storage,
    C: Clock,
{
    state.authorize()?;

    if let Some(route) = R::ROUTE {
        state.require_route(route)?;
    }

    Ok(())
}

pub fn print_items<'a, R, I>(items: I) -> error::Result
where
    R: Listing,
    R::Item: 'a,
    I: IntoIterator<Item = &'a R::Item>,
{
    let mut table = TextTable::with_columns(R::columns());

    for item in items {
        table.push(R::row(item));
    }

    if table.is_empty() {
        println!("no {} records found", R::NAME);
    } else {
        table.print(&PRETTY_OPTIONS)?;
    }

    Ok(())
}

fn print_state<R>(screen: &ListScreen<R>) -> error::Result
where
    R: Listing
{
    match screen.state() {
        ListState::Failed(msg) => Err(error::Error::from(msg.clone())),
        _ => print_items::<R, _>(screen.items()),
    }
}

/// the mutation already went through, a failed reload is only reported
fn print_after_mutation<R>(screen: &ListScreen<R>) -> error::Result
where
    R: Listing
{
    match screen.state() {
        ListState::Failed(msg) => {
            println!("warning: the list could not be reloaded: {}", msg);

            Ok(())
        },
        _ => print_items::<R, _>(screen.items()),
    }
}

/// loads the collection after the usual session and permission checks
pub fn load<R, S, C>(state: &mut AppState<S, C>) -> error::Result<ListScreen<R>>
where
    R: Listing,
    S: Storage,
    C: Clock,
{
    guard::<R, S, C>(state)?;

    let mut screen = ListScreen::<R>::new();
    screen.refresh(&state.client)?;

    Ok(screen)
}

pub fn get<R, S, C>(state: &mut AppState<S, C>) -> error::Result
where
    R: Listing,
    S: Storage,
    C: Clock,
{
    let screen = load::<R, S, C>(state)?;

    print_state(&screen)
}

pub fn create<R, S, C>(state: &mut AppState<S, C>, body: R::Create) -> error::Result
where
    R: Listing + CreateResource,
    S: Storage,
    C: Clock,
{
    guard::<R, S, C>(state)?;

    let mut screen = ListScreen::<R>::new();
    screen.create(&state.client, body)?;

    println!("{} created", R::NAME);

    print_after_mutation(&screen)
}

pub fn update<R, S, C>(state: &mut AppState<S, C>, id: Id, body: R::Update) -> error::Result
where
    R: Listing + UpdateResource,
    S: Storage,
    C: Clock,
{
    guard::<R, S, C>(state)?;

    let mut screen = ListScreen::<R>::new();
    screen.update(&state.client, id, body)?;

    println!("{} updated", R::NAME);

    print_after_mutation(&screen)
}

/// stages the delete and asks for confirmation unless `yes` is set.
/// returns `true` when the record was removed
pub fn delete<R, S, C>(state: &mut AppState<S, C>, id: Id, yes: bool) -> error::Result<bool>
where
    R: Listing + DeleteResource,
    S: Storage,
    C: Clock,
{
    let mut screen = load::<R, S, C>(state)?;

    screen.request_delete(id);

    let confirmed = yes || {
        let prompt = format!("delete {} {}?", R::NAME, screen.pending_delete().map(Id::as_str).unwrap_or(""));

        input::read_yn(prompt)?
    };

    if !confirmed {
        screen.cancel_delete();
        println!("nothing deleted");

        return Ok(false);
    }

    if let Some(id) = screen.confirm_delete(&state.client)? {
        println!("{} {} deleted", R::NAME, id);
    }

    print_after_mutation(&screen)?;

    Ok(true)
}

#[derive(Debug, clap::Args)]
pub struct DeleteArgs {
    /// id of the record to delete
    #[arg(long)]
    pub id: Id,

    /// skips the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}
