// Listing Controller - composition root for filter, fetch, pagination and
// selection state. All transitions go through `dispatch`.

pub mod intent;
pub mod view_model;

pub use intent::{FetchRequest, InitialFilters, Intent};
pub use view_model::{ListingStatus, ViewModel};

use std::num::NonZeroU32;
use tracing::{debug, info};

use crate::application::fetch::{Completion, FetchLifecycle, FetchState, RequestTicket};
use crate::constants::PAGE_SIZE;
use crate::domain::{
    build_query, FilterState, LocationFilter, Pagination, ResultSet, SelectionState,
};
use crate::port::{FetchError, ListingEndpoint, ListingPage};

/// Result of landing a fetch completion on the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Landed {
    pub completion: Completion,
    /// Refetch issued because the current page fell outside the new bounds
    pub follow_up: Option<FetchRequest>,
}

/// Listing Controller
///
/// Owns the committed filters, the search-control drafts, the fetch
/// lifecycle and the selection. Network I/O stays outside: intents return
/// the [`FetchRequest`] to issue, and outcomes come back through
/// [`ListingController::complete`].
#[derive(Debug)]
pub struct ListingController {
    filters: FilterState,
    draft_search: String,
    draft_location: LocationFilter,
    selection: SelectionState,
    lifecycle: FetchLifecycle,
}

impl ListingController {
    /// Create a controller from navigation-supplied starting values
    pub fn new(initial: InitialFilters) -> Self {
        let location = LocationFilter::from_navigation(initial.location_type.as_deref());
        let search = initial.search.unwrap_or_default();

        let mut filters = FilterState::new(search.clone(), location);
        // page 0 from outside is treated as "no page given"
        if let Some(page) = initial.page.and_then(NonZeroU32::new) {
            filters.go_to_page(page);
        }

        Self {
            filters,
            draft_search: search,
            draft_location: location,
            selection: SelectionState::default(),
            lifecycle: FetchLifecycle::new(),
        }
    }

    /// Issue the initial fetch for the mounted view
    pub fn mount(&mut self) -> FetchRequest {
        info!(
            search = %self.filters.search_text,
            location = %self.filters.location,
            page = self.filters.page(),
            "Listing mounted"
        );
        self.issue()
    }

    /// Apply an intent. Returns the fetch to issue, if the intent changed
    /// the committed filters or the page.
    pub fn dispatch(&mut self, intent: Intent) -> Option<FetchRequest> {
        match intent {
            Intent::SetSearchText(text) => {
                self.draft_search = text;
                None
            }
            Intent::SetLocationType(location) => {
                self.draft_location = location;
                None
            }
            Intent::Search => {
                self.filters
                    .commit_search(self.draft_search.clone(), self.draft_location);
                Some(self.issue())
            }
            Intent::GoToPage(page) => self.go_to_page(page),
            Intent::NextPage => self.go_to_page(self.filters.page().saturating_add(1)),
            Intent::PreviousPage => self.go_to_page(self.filters.page().saturating_sub(1)),
            Intent::Reload => Some(self.issue()),
            Intent::Select(id) => {
                self.selection.select(id);
                None
            }
            Intent::Dismiss => {
                self.selection.dismiss();
                None
            }
        }
    }

    /// Land the outcome of a previously issued request
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<ListingPage, FetchError>,
    ) -> Landed {
        let completion = self.lifecycle.complete(ticket, outcome);
        if completion != Completion::Applied {
            return Landed {
                completion,
                follow_up: None,
            };
        }

        self.selection.retain_in(self.lifecycle.results());

        let pagination = self.pagination();
        let follow_up = match NonZeroU32::new(pagination.clamped_page) {
            Some(last_page) if last_page.get() != self.filters.page() => {
                info!(
                    requested = self.filters.page(),
                    last_page = last_page.get(),
                    "Page beyond last page, refetching last page"
                );
                self.filters.go_to_page(last_page);
                Some(self.issue())
            }
            _ => None,
        };

        Landed {
            completion,
            follow_up,
        }
    }

    /// Issue `request` against `endpoint` and land it, following any
    /// page-clamp refetch. Sequential: one request in flight at a time.
    pub async fn settle(&mut self, endpoint: &dyn ListingEndpoint, request: FetchRequest) -> Completion {
        let mut request = request;
        loop {
            let outcome = endpoint.fetch(&request.query).await;
            let landed = self.complete(request.ticket, outcome);
            match landed.follow_up {
                Some(next) => request = next,
                None => return landed.completion,
            }
        }
    }

    /// Apply an intent and, if it fetches, wait for the result
    pub async fn dispatch_and_settle(
        &mut self,
        endpoint: &dyn ListingEndpoint,
        intent: Intent,
    ) -> Option<Completion> {
        match self.dispatch(intent) {
            Some(request) => Some(self.settle(endpoint, request).await),
            None => None,
        }
    }

    pub fn view_model(&self) -> ViewModel {
        let results = self.lifecycle.results();
        let pagination = self.pagination();

        ViewModel {
            jobs: results.items.clone(),
            total: results.total,
            loading: self.lifecycle.is_loading(),
            error: self.lifecycle.failure().cloned(),
            page: self.filters.page(),
            total_pages: pagination.total_pages,
            has_previous: pagination.has_previous,
            has_next: pagination.has_next,
            selected_job: self.selection.resolve(results).cloned(),
            search_text: self.draft_search.clone(),
            location: self.draft_location,
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn results(&self) -> &ResultSet {
        self.lifecycle.results()
    }

    pub fn fetch_state(&self) -> FetchState {
        self.lifecycle.state()
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::compute(self.lifecycle.results().total, PAGE_SIZE, self.filters.page())
    }

    fn go_to_page(&mut self, page: u32) -> Option<FetchRequest> {
        let target = NonZeroU32::new(page)
            .filter(|p| p.get() != self.filters.page() && self.pagination().allows(p.get()));
        let Some(target) = target else {
            debug!(
                page,
                current = self.filters.page(),
                total_pages = self.pagination().total_pages,
                "Ignoring page change outside bounds"
            );
            return None;
        };
        self.filters.go_to_page(target);
        Some(self.issue())
    }

    fn issue(&mut self) -> FetchRequest {
        let ticket = self.lifecycle.begin();
        let query = build_query(&self.filters);
        info!(
            sequence = ticket.sequence(),
            search = ?query.search,
            location_type = ?query.location_type,
            page = query.page,
            "Fetching listing"
        );
        FetchRequest { ticket, query }
    }
}

impl Default for ListingController {
    fn default() -> Self {
        Self::new(InitialFilters::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Job, JobId, LocationType, QueryDescriptor};
    use crate::port::listing_endpoint::mocks::ScriptedListingEndpoint;
    use crate::port::listing_endpoint::MockListingEndpoint;
    use crate::port::FailureCategory;

    fn jobs(prefix: &str, n: usize) -> Vec<Job> {
        (0..n)
            .map(|i| Job::new(format!("{prefix}{i}"), format!("Job {prefix}{i}")))
            .collect()
    }

    /// Controller with one successful page already landed
    fn loaded(total: u64, items: Vec<Job>) -> ListingController {
        let mut controller = ListingController::default();
        let request = controller.mount();
        controller.complete(request.ticket, Ok(ListingPage::new(items, total)));
        controller
    }

    #[test]
    fn test_mount_uses_navigation_values() {
        let mut controller = ListingController::new(InitialFilters::new(
            Some("rust".into()),
            Some("remote".into()),
        ));
        let request = controller.mount();

        assert_eq!(request.query.search.as_deref(), Some("rust"));
        assert_eq!(request.query.location_type, Some(LocationType::Remote));
        assert_eq!(request.query.page, 1);

        let vm = controller.view_model();
        assert!(vm.loading);
        assert_eq!(vm.search_text, "rust");
        assert_eq!(vm.location, LocationFilter::Remote);
    }

    #[test]
    fn test_mount_without_values_is_recommended_listing() {
        let mut controller = ListingController::default();
        assert_eq!(controller.mount().query, QueryDescriptor::recommended());
    }

    #[test]
    fn test_unknown_navigation_location_means_any() {
        let mut controller =
            ListingController::new(InitialFilters::new(None, Some("all".into())));
        assert_eq!(controller.mount().query.location_type, None);
    }

    #[test]
    fn test_drafts_do_not_fetch() {
        let mut controller = loaded(47, jobs("a", 20));

        assert!(controller
            .dispatch(Intent::SetSearchText("eng".into()))
            .is_none());
        assert!(controller
            .dispatch(Intent::SetLocationType(LocationFilter::Hybrid))
            .is_none());

        // drafts are visible but not committed
        let vm = controller.view_model();
        assert_eq!(vm.search_text, "eng");
        assert_eq!(vm.location, LocationFilter::Hybrid);
        assert_eq!(controller.filters().search_text, "");
        assert!(!vm.loading);
    }

    #[test]
    fn test_search_from_deep_page_resets_to_first() {
        let mut controller = loaded(200, jobs("a", 20));
        controller.dispatch(Intent::GoToPage(5)).unwrap();
        assert_eq!(controller.filters().page(), 5);

        controller.dispatch(Intent::SetSearchText("engineer".into()));
        controller.dispatch(Intent::SetLocationType(LocationFilter::Remote));
        let request = controller.dispatch(Intent::Search).unwrap();

        assert_eq!(
            request.query,
            QueryDescriptor {
                search: Some("engineer".into()),
                location_type: Some(LocationType::Remote),
                page: 1,
                page_size: 20,
                sort: "score",
            }
        );
        assert_eq!(controller.filters().page(), 1);
    }

    #[test]
    fn test_go_to_page_within_bounds() {
        let mut controller = loaded(47, jobs("a", 20));

        let request = controller.dispatch(Intent::GoToPage(3)).unwrap();
        assert_eq!(request.query.page, 3);
        assert_eq!(controller.filters().search_text, "");

        controller.complete(request.ticket, Ok(ListingPage::new(jobs("c", 7), 47)));
        let vm = controller.view_model();
        assert_eq!(vm.page, 3);
        assert_eq!(vm.total_pages, 3);
        assert!(!vm.has_next);
        assert!(vm.has_previous);
    }

    #[test]
    fn test_go_to_page_out_of_bounds_is_noop() {
        let mut controller = loaded(47, jobs("a", 20));
        assert!(controller.dispatch(Intent::GoToPage(0)).is_none());
        assert!(controller.dispatch(Intent::GoToPage(4)).is_none());
        assert!(controller.dispatch(Intent::GoToPage(1)).is_none());
        assert!(controller.dispatch(Intent::PreviousPage).is_none());
        assert_eq!(controller.filters().page(), 1);
        assert!(!controller.view_model().loading);
    }

    #[test]
    fn test_empty_total_blocks_navigation() {
        let mut controller = loaded(0, vec![]);
        for page in [0, 1, 2, 10] {
            assert!(controller.dispatch(Intent::GoToPage(page)).is_none());
        }
        assert!(controller.dispatch(Intent::NextPage).is_none());

        let vm = controller.view_model();
        assert_eq!(vm.total_pages, 0);
        assert!(!vm.has_next);
        assert!(!vm.has_previous);
        assert_eq!(vm.status(), ListingStatus::Empty);
    }

    #[test]
    fn test_next_and_previous() {
        let mut controller = loaded(47, jobs("a", 20));
        let next = controller.dispatch(Intent::NextPage).unwrap();
        assert_eq!(next.query.page, 2);
        let prev = controller.dispatch(Intent::PreviousPage).unwrap();
        assert_eq!(prev.query.page, 1);
    }

    #[test]
    fn test_reload_refetches_current_filters() {
        let mut controller = loaded(47, jobs("a", 20));
        controller.dispatch(Intent::GoToPage(2)).unwrap();
        let request = controller.dispatch(Intent::Reload).unwrap();
        assert_eq!(request.query.page, 2);
    }

    #[test]
    fn test_selection_resolves_against_current_page() {
        let mut controller = loaded(2, jobs("a", 2));

        assert!(controller.dispatch(Intent::Select(JobId::new("a1"))).is_none());
        assert_eq!(
            controller.view_model().selected_job.map(|j| j.id),
            Some(JobId::new("a1"))
        );

        controller.dispatch(Intent::Select(JobId::new("missing")));
        assert!(controller.view_model().selected_job.is_none());

        controller.dispatch(Intent::Select(JobId::new("a0")));
        controller.dispatch(Intent::Dismiss);
        assert!(!controller.view_model().is_detail_open());
    }

    #[test]
    fn test_refetch_closes_vanished_selection() {
        let mut controller = loaded(40, jobs("a", 20));
        controller.dispatch(Intent::Select(JobId::new("a3")));

        let request = controller.dispatch(Intent::NextPage).unwrap();
        // still visible while the next page loads
        assert!(controller.view_model().selected_job.is_some());

        controller.complete(request.ticket, Ok(ListingPage::new(jobs("b", 20), 40)));
        assert!(controller.view_model().selected_job.is_none());

        // and it stays closed even if the job comes back later
        let request = controller.dispatch(Intent::PreviousPage).unwrap();
        controller.complete(request.ticket, Ok(ListingPage::new(jobs("a", 20), 40)));
        assert!(controller.view_model().selected_job.is_none());
    }

    #[test]
    fn test_failure_keeps_jobs_and_reports_error() {
        let mut controller = loaded(47, jobs("a", 20));
        let request = controller.dispatch(Intent::NextPage).unwrap();
        let landed = controller.complete(
            request.ticket,
            Err(FetchError::Transport("connection refused".into())),
        );

        assert_eq!(landed.completion, Completion::Failed);
        let vm = controller.view_model();
        assert_eq!(vm.jobs.len(), 20);
        assert_eq!(vm.total, 47);
        assert!(!vm.loading);
        assert_eq!(vm.error.unwrap().category, FailureCategory::Transport);
        assert_eq!(controller.fetch_state(), FetchState::Failed);
    }

    #[test]
    fn test_error_status_when_nothing_loaded() {
        let mut controller = ListingController::default();
        let request = controller.mount();
        controller.complete(
            request.ticket,
            Err(FetchError::MalformedResponse("bad".into())),
        );
        assert_eq!(controller.view_model().status(), ListingStatus::Error);
    }

    #[test]
    fn test_rapid_page_changes_latest_wins() {
        let mut controller = loaded(100, jobs("p1-", 20));
        let r2 = controller.dispatch(Intent::GoToPage(2)).unwrap();
        let r3 = controller.dispatch(Intent::GoToPage(3)).unwrap();

        let landed = controller.complete(r3.ticket, Ok(ListingPage::new(jobs("p3-", 20), 100)));
        assert_eq!(landed.completion, Completion::Applied);
        let landed = controller.complete(r2.ticket, Ok(ListingPage::new(jobs("p2-", 20), 100)));
        assert_eq!(landed.completion, Completion::Discarded);

        let vm = controller.view_model();
        assert_eq!(vm.page, 3);
        assert!(vm.jobs.iter().all(|j| j.id.as_str().starts_with("p3-")));
    }

    #[test]
    fn test_stale_page_from_navigation_is_clamped() {
        let mut controller =
            ListingController::new(InitialFilters::default().with_page(9));
        let request = controller.mount();
        assert_eq!(request.query.page, 9);

        let landed = controller.complete(request.ticket, Ok(ListingPage::new(vec![], 47)));
        let follow_up = landed.follow_up.expect("clamped refetch");
        assert_eq!(follow_up.query.page, 3);
        assert_eq!(controller.filters().page(), 3);
        assert!(controller.view_model().loading);

        let landed = controller.complete(follow_up.ticket, Ok(ListingPage::new(jobs("c", 7), 47)));
        assert!(landed.follow_up.is_none());
        assert_eq!(controller.view_model().page, 3);
    }

    #[test]
    fn test_page_zero_from_navigation_ignored() {
        let mut controller =
            ListingController::new(InitialFilters::default().with_page(0));
        assert_eq!(controller.mount().query.page, 1);
    }

    #[tokio::test]
    async fn test_each_fetching_intent_calls_endpoint_once() {
        let mut endpoint = MockListingEndpoint::new();
        endpoint
            .expect_fetch()
            .withf(|q| q.page == 1 && q.search.is_none())
            .times(1)
            .returning(|_| Ok(ListingPage::new(jobs("a", 20), 47)));
        endpoint
            .expect_fetch()
            .withf(|q| q.page == 2)
            .times(1)
            .returning(|_| Ok(ListingPage::new(jobs("b", 20), 47)));

        let mut controller = ListingController::default();
        let request = controller.mount();
        assert_eq!(controller.settle(&endpoint, request).await, Completion::Applied);

        // selection and drafts never reach the endpoint
        assert!(controller
            .dispatch_and_settle(&endpoint, Intent::Select(JobId::new("a1")))
            .await
            .is_none());
        assert!(controller
            .dispatch_and_settle(&endpoint, Intent::SetSearchText("x".into()))
            .await
            .is_none());

        let completion = controller
            .dispatch_and_settle(&endpoint, Intent::NextPage)
            .await;
        assert_eq!(completion, Some(Completion::Applied));
        assert_eq!(controller.view_model().page, 2);
    }

    #[tokio::test]
    async fn test_settle_follows_clamp_redirect() {
        let endpoint = ScriptedListingEndpoint::new();
        endpoint
            .push_ok(ListingPage::new(vec![], 25))
            .push_ok(ListingPage::new(jobs("b", 5), 25));

        let mut controller =
            ListingController::new(InitialFilters::default().with_page(7));
        let request = controller.mount();
        controller.settle(&endpoint, request).await;

        let pages: Vec<u32> = endpoint.queries().iter().map(|q| q.page).collect();
        assert_eq!(pages, [7, 2]);
        assert_eq!(controller.view_model().jobs.len(), 5);
    }
}
