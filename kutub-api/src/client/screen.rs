//! state behind a single management screen: the loaded list, the
//! create/edit forms and the delete confirmation.
//!
//! every fetch is tagged with a ticket. a result that arrives for an older
//! ticket, or after the screen was closed, is dropped so a slow response can
//! never overwrite a newer one.

use kutub_lib::ids::Id;

use crate::client::ApiClient;
use crate::client::error::RequestError;
use crate::client::resource::{QueryList, CreateItem, UpdateItem, DeleteItem};
use crate::resource::{Resource, CreateResource, UpdateResource, DeleteResource};

#[derive(Debug, PartialEq)]
pub enum ListState<T> {
    Idle,
    Loading,
    Empty,
    Loaded(Vec<T>),
    /// the first load failed, nothing to show
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

pub struct ListScreen<R>
where
    R: Resource
{
    state: ListState<R::Item>,
    generation: u64,
    closed: bool,
    pending_delete: Option<Id>,
    last_error: Option<String>,
}

impl<R> ListScreen<R>
where
    R: Resource
{
    pub fn new() -> Self {
        ListScreen {
            state: ListState::Idle,
            generation: 0,
            closed: false,
            pending_delete: None,
            last_error: None,
        }
    }

    pub fn state(&self) -> &ListState<R::Item> {
        &self.state
    }

    /// loaded items, empty for every other state
    pub fn items(&self) -> &[R::Item] {
        match &self.state {
            ListState::Loaded(items) => items,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ListState::Loading)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// message from the most recent failed operation
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;

        if matches!(self.state, ListState::Idle | ListState::Failed(_)) {
            self.state = ListState::Loading;
        }

        FetchTicket(self.generation)
    }

    /// applies a fetch result. returns `Ok(false)` when the result was
    /// stale and ignored
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<R::Item>, RequestError>
    ) -> Result<bool, RequestError> {
        if self.closed || ticket.0 != self.generation {
            tracing::debug!("dropping stale {} list result", R::NAME);

            return Ok(false);
        }

        match result {
            Ok(items) => {
                self.state = if items.is_empty() {
                    ListState::Empty
                } else {
                    ListState::Loaded(items)
                };
                self.last_error = None;

                Ok(true)
            },
            Err(err) => {
                let msg = err.display_message();

                tracing::warn!("failed to load {} list: {}", R::NAME, err);

                if self.is_loading() {
                    self.state = ListState::Failed(msg.clone());
                }

                self.last_error = Some(msg);

                Err(err)
            }
        }
    }

    pub fn refresh(&mut self, client: &ApiClient) -> Result<(), RequestError> {
        let ticket = self.begin_fetch();
        let result = QueryList::<R>::new()
            .send(client)
            .map(|payload| payload.into_payload());

        self.finish_fetch(ticket, result).map(|_| ())
    }

    /// later fetch results are discarded and any delete prompt is dropped
    pub fn close(&mut self) {
        self.closed = true;
        self.pending_delete = None;
    }

    /// a successful mutation re-fetches the list. a failed re-fetch is
    /// recorded but does not undo the mutation
    fn after_mutation(&mut self, client: &ApiClient) {
        self.last_error = None;

        if let Err(err) = self.refresh(client) {
            tracing::warn!("{} saved but the list could not be reloaded: {}", R::NAME, err);
        }
    }

    fn record_failure(&mut self, err: RequestError) -> RequestError {
        self.last_error = Some(err.display_message());
        err
    }
}

impl<R> Default for ListScreen<R>
where
    R: Resource
{
    fn default() -> Self {
        ListScreen::new()
    }
}

impl<R> ListScreen<R>
where
    R: CreateResource
{
    pub fn create(&mut self, client: &ApiClient, body: R::Create) -> Result<(), RequestError> {
        match CreateItem::<R>::new(body).send(client) {
            Ok(_) => {
                tracing::info!("created {}", R::NAME);

                self.after_mutation(client);

                Ok(())
            },
            Err(err) => Err(self.record_failure(err)),
        }
    }
}

impl<R> ListScreen<R>
where
    R: UpdateResource
{
    pub fn update(&mut self, client: &ApiClient, id: Id, body: R::Update) -> Result<(), RequestError> {
        match UpdateItem::<R>::id(id, body).send(client) {
            Ok(_) => {
                tracing::info!("updated {}", R::NAME);

                self.after_mutation(client);

                Ok(())
            },
            Err(err) => Err(self.record_failure(err)),
        }
    }
}

impl<R> ListScreen<R>
where
    R: DeleteResource
{
    /// stages a delete until it is confirmed or cancelled
    pub fn request_delete(&mut self, id: Id) {
        self.pending_delete = Some(id);
    }

    pub fn pending_delete(&self) -> Option<&Id> {
        self.pending_delete.as_ref()
    }

    pub fn cancel_delete(&mut self) -> Option<Id> {
        self.pending_delete.take()
    }

    /// sends the staged delete. on success the item is dropped from the
    /// loaded list, on failure the prompt stays staged
    pub fn confirm_delete(&mut self, client: &ApiClient) -> Result<Option<Id>, RequestError> {
        let Some(id) = self.pending_delete.take() else {
            return Ok(None);
        };

        match DeleteItem::<R>::id(id.clone()).send(client) {
            Ok(_) => {
                tracing::info!("deleted {} {}", R::NAME, id);

                self.remove_local(&id);
                self.last_error = None;

                Ok(Some(id))
            },
            Err(err) => {
                self.pending_delete = Some(id);

                Err(self.record_failure(err))
            }
        }
    }

    fn remove_local(&mut self, id: &Id) {
        let now_empty = match &mut self.state {
            ListState::Loaded(items) => {
                items.retain(|item| R::item_id(item) != id);
                items.is_empty()
            },
            _ => false,
        };

        if now_empty {
            self.state = ListState::Empty;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{ApiError, GeneralKind};
    use crate::client::test::unroutable;
    use crate::catalog::{Authors, Author, NameBody};

    fn author(id: i64, name: &str) -> Author {
        Author { id: Id::from(id), name: name.into() }
    }

    fn failure() -> RequestError {
        RequestError::Api(ApiError::from_status(500, Some("Server xatosi".into())))
    }

    #[test]
    fn first_load() {
        let mut screen = ListScreen::<Authors>::new();
        let ticket = screen.begin_fetch();

        assert!(screen.is_loading());

        assert!(screen.finish_fetch(ticket, Ok(vec![author(1, "Navoiy")])).unwrap());
        assert_eq!(screen.items().len(), 1);

        let ticket = screen.begin_fetch();

        // reloading keeps the current rows visible
        assert!(!screen.is_loading());

        screen.finish_fetch(ticket, Ok(Vec::new())).unwrap();

        assert_eq!(*screen.state(), ListState::Empty);
    }

    #[test]
    fn stale_results_are_dropped() {
        let mut screen = ListScreen::<Authors>::new();
        let old = screen.begin_fetch();
        let new = screen.begin_fetch();

        screen.finish_fetch(new, Ok(vec![author(2, "Qodiriy")])).unwrap();

        assert!(!screen.finish_fetch(old, Ok(vec![author(1, "Navoiy")])).unwrap());
        assert_eq!(screen.items()[0].name, "Qodiriy");
    }

    #[test]
    fn results_after_close_are_dropped() {
        let mut screen = ListScreen::<Authors>::new();
        let ticket = screen.begin_fetch();

        screen.close();

        assert!(!screen.finish_fetch(ticket, Ok(vec![author(1, "Navoiy")])).unwrap());
        assert!(screen.items().is_empty());
    }

    #[test]
    fn failed_first_load() {
        let mut screen = ListScreen::<Authors>::new();
        let ticket = screen.begin_fetch();

        assert!(screen.finish_fetch(ticket, Err(failure())).is_err());
        assert_eq!(*screen.state(), ListState::Failed("Server xatosi".into()));
    }

    #[test]
    fn failed_reload_keeps_rows() {
        let mut screen = ListScreen::<Authors>::new();
        let ticket = screen.begin_fetch();
        screen.finish_fetch(ticket, Ok(vec![author(1, "Navoiy")])).unwrap();

        let ticket = screen.begin_fetch();

        assert!(screen.finish_fetch(ticket, Err(failure())).is_err());
        assert_eq!(screen.items().len(), 1);
        assert_eq!(screen.last_error(), Some("Server xatosi"));
    }

    #[test]
    fn invalid_create_keeps_state() {
        let client = unroutable();
        let mut screen = ListScreen::<Authors>::new();
        let ticket = screen.begin_fetch();
        screen.finish_fetch(ticket, Ok(vec![author(1, "Navoiy")])).unwrap();

        let err = screen.create(&client, NameBody::new("  ")).unwrap_err();

        assert_eq!(
            err.api().map(|e| e.kind().clone()),
            Some(GeneralKind::ValidationFailed.into())
        );
        assert_eq!(screen.items().len(), 1);
        assert!(screen.last_error().is_some());
    }

    #[test]
    fn delete_prompt() {
        let client = unroutable();
        let mut screen = ListScreen::<Authors>::new();
        let ticket = screen.begin_fetch();
        screen.finish_fetch(ticket, Ok(vec![author(1, "Navoiy"), author(2, "Qodiriy")])).unwrap();

        assert_eq!(screen.confirm_delete(&client).unwrap(), None);

        screen.request_delete(Id::from(2));

        assert_eq!(screen.cancel_delete(), Some(Id::from(2)));
        assert_eq!(screen.pending_delete(), None);

        screen.request_delete(Id::from(2));

        // server unreachable, prompt stays staged and rows are untouched
        assert!(screen.confirm_delete(&client).is_err());
        assert_eq!(screen.pending_delete(), Some(&Id::from(2)));
        assert_eq!(screen.items().len(), 2);
    }

    #[test]
    fn local_removal() {
        let mut screen = ListScreen::<Authors>::new();
        let ticket = screen.begin_fetch();
        screen.finish_fetch(ticket, Ok(vec![author(1, "Navoiy")])).unwrap();

        screen.remove_local(&Id::from(1));

        assert_eq!(*screen.state(), ListState::Empty);
    }
}
