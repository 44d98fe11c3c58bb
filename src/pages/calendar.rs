//! Controller of the calendar page
use super::generation::{Generation, RequestGenerations};
use super::write_failure;
use crate::clock::Clock;
use crate::forms::CourseForm;
use crate::session::Session;
use crate::ui::{Region, Ui};
use crate::view::{self, calendar};
use crate::week::{Week, WeekGrid};
use maud::html;
use school_portal_client::api::v1::calendar::{DeleteEvent, Event, EventId};
use school_portal_client::api::v1::groups::Group;
use school_portal_client::api::v1::ApiError;
use school_portal_client::PortalApi;

pub const LOAD_ERROR: &str = "Erreur lors du chargement du calendrier.";
pub const INCOMPLETE_COURSE: &str =
    "Veuillez remplir tous les champs obligatoires et sélectionner au moins une classe";
pub const SAVED: &str = "Cours enregistré avec succès";
pub const SAVE_REJECTED: &str = "Erreur lors de l'enregistrement";
pub const SAVE_FAILED: &str = "Erreur lors de l'enregistrement du cours";
pub const DELETED: &str = "Cours supprimé avec succès";
pub const DELETE_REJECTED: &str = "Erreur lors de la suppression";
pub const DELETE_FAILED: &str = "Erreur lors de la suppression du cours";
pub const CONFIRM_DELETE: &str = "Êtes-vous sûr de vouloir supprimer ce cours ?";
pub const SERIES_PROMPT: &str = "Ce cours fait partie d'une série récurrente.";
pub const UNKNOWN_COURSE: &str = "Cours introuvable";
pub const WEEK_OUT_OF_RANGE: &str = "Cette semaine ne peut pas être affichée";

/// Everything the calendar page shows
#[derive(Debug, Default)]
pub struct CalendarState {
    /// Weeks away from the current one
    pub week_offset: i64,
    pub events: Vec<Event>,
    pub groups: Vec<Group>,
    event_requests: RequestGenerations,
    group_requests: RequestGenerations,
}

impl CalendarState {
    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }
}

pub struct CalendarPage<A, U> {
    api: A,
    ui: U,
    clock: Box<dyn Clock>,
    session: Session,
    state: CalendarState,
}

impl<A, U> CalendarPage<A, U>
where
    A: PortalApi,
    U: Ui,
{
    pub fn new(api: A, ui: U, clock: Box<dyn Clock>, session: Session) -> Self {
        CalendarPage {
            api,
            ui,
            clock,
            session,
            state: CalendarState::default(),
        }
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    /// Renders the header and loads groups and events
    pub async fn open(&mut self) {
        self.render_header();
        self.load_groups().await;
        self.load_events().await;
    }

    pub fn render_header(&mut self) {
        self.ui
            .render(Region::UserName, view::user_name(&self.session));
        self.ui.render(
            Region::TeacherActions,
            calendar::teacher_actions(&self.session),
        );
    }

    pub async fn load_groups(&mut self) {
        let ticket = self.state.group_requests.issue();
        let result = self.api.list_groups().await;
        self.apply_groups(ticket, result);
    }

    /// Stores a group response, returns false if it was discarded
    pub fn apply_groups(
        &mut self,
        ticket: Generation,
        result: Result<Vec<Group>, ApiError>,
    ) -> bool {
        if !self.state.group_requests.is_current(ticket) {
            log::debug!("Discarding stale group response {:?}", ticket);
            return false;
        }

        match result {
            Ok(groups) => {
                log::debug!("Loaded {} groups", groups.len());
                self.state.groups = groups;
                self.ui.render(
                    Region::GroupOptions,
                    calendar::group_options(&self.state.groups, &[]),
                );
            }
            Err(e) => log::error!("Failed to load groups: {}", e),
        }

        true
    }

    /// Ticket for an event request issued outside of [`Self::load_events`]
    pub fn issue_events_request(&mut self) -> Generation {
        self.state.event_requests.issue()
    }

    pub async fn load_events(&mut self) {
        let ticket = self.issue_events_request();
        let result = self.api.list_events().await;
        self.apply_events(ticket, result);
    }

    /// Stores an event response and redraws the week, returns false if it was discarded
    pub fn apply_events(&mut self, ticket: Generation, result: Result<Vec<Event>, ApiError>) -> bool {
        if !self.state.event_requests.is_current(ticket) {
            log::debug!("Discarding stale event response {:?}", ticket);
            return false;
        }

        match result {
            Ok(events) => {
                log::debug!("Loaded {} events", events.len());
                self.state.events = events;
                self.render_week_view();
            }
            Err(e) => {
                log::error!("Failed to load events: {}", e);
                self.ui
                    .render(Region::CalendarContainer, view::load_error(LOAD_ERROR));
            }
        }

        true
    }

    /// `None` if the offset moves the week out of the calendar's range
    pub fn displayed_week(&self) -> Option<Week> {
        Week::containing(self.clock.today(), self.state.week_offset)
    }

    pub fn render_week_view(&mut self) {
        let week = match self.displayed_week() {
            Some(week) => week,
            None => {
                log::warn!("Week offset {} is out of range", self.state.week_offset);
                self.ui.clear(Region::WeekDisplay);
                self.ui.render(
                    Region::CalendarContainer,
                    view::load_error(WEEK_OUT_OF_RANGE),
                );
                return;
            }
        };
        let grid = WeekGrid::build(week, &self.state.events);
        let markup = calendar::week_view(&calendar::CalendarView {
            grid: &grid,
            now: self.clock.now(),
        });

        self.ui
            .render(Region::WeekDisplay, html! { (calendar::week_label(week)) });
        self.ui.render(Region::CalendarContainer, markup);
    }

    /// Moves the displayed week by `delta` weeks
    ///
    /// An unreachable week leaves the displayed one in place.
    pub fn change_week(&mut self, delta: i64) {
        let today = self.clock.today();
        let offset = self
            .state
            .week_offset
            .checked_add(delta)
            .filter(|offset| Week::containing(today, *offset).is_some());

        match offset {
            Some(offset) => {
                self.state.week_offset = offset;
                self.render_week_view();
            }
            None => {
                log::warn!(
                    "Cannot move week offset {} by {}",
                    self.state.week_offset,
                    delta
                );
                self.ui.alert(WEEK_OUT_OF_RANGE);
            }
        }
    }

    pub fn go_to_today(&mut self) {
        self.state.week_offset = 0;
        self.render_week_view();
    }

    pub fn view_event_details(&mut self, id: EventId) {
        match self.state.event(id) {
            Some(event) => {
                let markup = calendar::event_details(event, &self.session);
                self.ui.render(Region::Modal, markup);
            }
            None => {
                log::warn!("Event {} is not loaded", id);
                self.ui.alert(UNKNOWN_COURSE);
            }
        }
    }

    /// Shows an empty course form, returns it for the caller to fill in
    pub fn open_add_course(&mut self) -> CourseForm {
        let form = CourseForm::new(self.clock.today());
        self.ui.render(
            Region::CourseModal,
            calendar::course_form(&form, &self.state.groups),
        );
        form
    }

    /// Shows the course form prefilled with an existing course
    pub fn open_edit_course(&mut self, id: EventId) -> Option<CourseForm> {
        let today = self.clock.today();

        let form = match self.state.event(id) {
            Some(event) => CourseForm::from_event(event, today),
            None => {
                log::warn!("Event {} is not loaded", id);
                self.ui.alert(UNKNOWN_COURSE);
                return None;
            }
        };

        self.ui.render(
            Region::CourseModal,
            calendar::course_form(&form, &self.state.groups),
        );
        Some(form)
    }

    /// Creates or updates a course, depending on whether the form carries an id
    pub async fn submit_course(&mut self, form: &CourseForm) {
        let request = match form.to_request() {
            Some(request) => request,
            None => {
                self.ui.alert(INCOMPLETE_COURSE);
                return;
            }
        };

        let result = match form.event_id {
            Some(id) => self.api.update_event(id, &request).await,
            None => self.api.create_event(&request).await,
        };

        match result {
            Ok(status) => {
                self.ui.clear(Region::CourseModal);
                self.load_events().await;
                self.ui
                    .alert(status.message.as_deref().unwrap_or(SAVED));
            }
            Err(e) => {
                log::error!("Failed to save course: {}", e);
                self.ui
                    .alert(&write_failure(&e, SAVE_REJECTED, SAVE_FAILED));
            }
        }
    }

    /// Deletes a course after asking the user
    ///
    /// Members of a recurring series ask whether the whole series goes, every other course
    /// asks for a plain confirmation.
    pub async fn delete_course(&mut self, id: EventId) {
        let is_series_member = match self.state.event(id) {
            Some(event) => event.is_series_member(),
            None => {
                log::warn!("Event {} is not loaded", id);
                self.ui.alert(UNKNOWN_COURSE);
                return;
            }
        };

        let delete_series = if is_series_member {
            match self.ui.choose_delete_scope(SERIES_PROMPT) {
                Some(scope) => scope.is_series(),
                None => return,
            }
        } else {
            if !self.ui.confirm(CONFIRM_DELETE) {
                return;
            }
            false
        };

        match self
            .api
            .delete_event(id, &DeleteEvent { delete_series })
            .await
        {
            Ok(status) => {
                self.ui.clear(Region::Modal);
                self.load_events().await;
                self.ui
                    .alert(status.message.as_deref().unwrap_or(DELETED));
            }
            Err(e) => {
                log::error!("Failed to delete course {}: {}", id, e);
                self.ui
                    .alert(&write_failure(&e, DELETE_REJECTED, DELETE_FAILED));
            }
        }
    }
}
