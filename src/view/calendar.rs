//! Fragments of the calendar page
use super::format;
use crate::forms::CourseForm;
use crate::session::Session;
use crate::week::{self, Week, WeekGrid, DAYS_PER_WEEK};
use chrono::NaiveDateTime;
use maud::{html, Markup};
use school_portal_client::api::v1::calendar::{Event, RecurrenceType};
use school_portal_client::api::v1::groups::{Group, GroupId};

pub const EMPTY_WEEK: &str = "Aucun cours cette semaine";
pub const NO_GROUPS: &str = "Aucun groupe disponible - Contactez un administrateur";

/// Everything the week view is drawn from
pub struct CalendarView<'a> {
    pub grid: &'a WeekGrid<'a, Event>,
    pub now: NaiveDateTime,
}

/// `Semaine du 10/06/2024 au 16/06/2024`
pub fn week_label(week: Week) -> String {
    format!(
        "Semaine du {} au {}",
        format::short_date(week.start()),
        format::short_date(week.end())
    )
}

/// Buttons only offered to teachers and admins
pub fn teacher_actions(session: &Session) -> Markup {
    html! {
        @if session.can_manage_courses() {
            button class="px-4 py-2 bg-orange-500 text-white rounded-lg" data-action="add-course" {
                "Ajouter un cours"
            }
        }
    }
}

pub fn week_view(view: &CalendarView<'_>) -> Markup {
    let grid = view.grid;
    let today = view.now.date();

    html! {
        div class="overflow-x-auto" {
            table class="w-full border-collapse" {
                thead {
                    tr {
                        th class="border p-2 bg-gray-50 w-20" { "Heure" }
                        @for (index, day) in grid.week().days().enumerate() {
                            th class={ "border p-2 min-w-[140px] " (if day == today { "bg-orange-100" } else { "bg-gray-50" }) } {
                                div class="font-semibold" { (format::DAY_NAMES[index]) }
                                div class="text-sm font-normal" { (format::day_month(day)) }
                            }
                        }
                    }
                }
                tbody {
                    @for hour in week::hours() {
                        tr {
                            td class="border p-2 text-sm text-gray-600 bg-gray-50 text-center font-medium" {
                                (hour) ":00"
                            }
                            @for day in 0..DAYS_PER_WEEK {
                                td class="border p-1 align-top time-slot" {
                                    @for event in grid.cell(day, hour) {
                                        (event_card(event, view.now))
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
        @if grid.is_empty() {
            div class="text-center py-8 text-gray-500" { (EMPTY_WEEK) }
        }
    }
}

pub fn event_card(event: &Event, now: NaiveDateTime) -> Markup {
    let is_past = event.end_time < now;
    let is_long = (event.end_time - event.start_time).num_minutes() > 60;

    let style = if is_past {
        "bg-gray-100 border-gray-400"
    } else {
        "bg-orange-50 border-orange-500"
    };
    let height = if is_long {
        "min-h-[120px]"
    } else {
        "min-h-[60px]"
    };

    html! {
        div class={ "event-card mb-1 p-2 rounded-lg border-l-4 " (style) " " (height) } data-event-id=(event.id.0) {
            div class="font-semibold text-sm text-gray-800 mb-1" { (event.title) }
            div class="text-xs text-gray-600" {
                (format::time(event.start_time)) " - " (format::time(event.end_time))
            }
            @if let Some(location) = non_empty(&event.location) {
                div class="text-xs text-gray-600 mt-1" { "📍 " (location) }
            }
            @if let Some(group_name) = non_empty(&event.group_name) {
                div class="text-xs text-gray-500 mt-1" { (group_name) }
            }
            @if event.is_recurring_instance() {
                div class="text-xs text-orange-600 mt-1" { "🔁 Récurrent" }
            }
        }
    }
}

/// Modal with all details of a course
pub fn event_details(event: &Event, session: &Session) -> Markup {
    let can_delete = session.can_modify(event);

    html! {
        div class="modal fixed inset-0 bg-black bg-opacity-50 z-50 flex items-center justify-center p-4" {
            div class="bg-white rounded-2xl shadow-2xl max-w-lg w-full" {
                div class="bg-gradient-to-r from-orange-500 to-orange-600 p-6 text-white rounded-t-2xl" {
                    h2 class="text-2xl font-bold" { (event.title) }
                    @if let Some(creator) = non_empty(&event.creator_name) {
                        p class="text-sm mt-1 text-orange-100" { "Par " (creator) }
                    }
                }
                div class="p-6 space-y-4" {
                    (detail("Date et heure", html! {
                        div class="text-gray-800" { (format::long_date(event.start_time.date())) }
                        div class="text-gray-800" {
                            (format::time(event.start_time)) " - " (format::time(event.end_time))
                        }
                    }))
                    @if let Some(group_name) = non_empty(&event.group_name) {
                        (detail("Classe", html! { div class="text-gray-800" { (group_name) } }))
                    }
                    @if let Some(location) = non_empty(&event.location) {
                        (detail("Salle", html! { div class="text-gray-800" { "📍 " (location) } }))
                    }
                    @if let Some(description) = non_empty(&event.description) {
                        (detail("Description", html! { div class="text-gray-800" { (description) } }))
                    }
                    @if event.is_series_member() {
                        div class="bg-orange-50 p-3 rounded-lg" {
                            div class="text-sm font-semibold text-orange-700" { "🔁 Cours récurrent" }
                        }
                    }
                    div class="flex justify-end space-x-3 pt-4 border-t" {
                        button class="px-4 py-2 border border-gray-300 rounded-lg" data-action="close" { "Fermer" }
                        @if can_delete {
                            button class="px-4 py-2 bg-red-500 text-white rounded-lg"
                                data-action="delete-course"
                                data-event-id=(event.id.0)
                                data-series=(if event.is_series_member() { "true" } else { "false" }) {
                                "Supprimer"
                            }
                        }
                    }
                }
            }
        }
    }
}

fn detail(label: &str, content: Markup) -> Markup {
    html! {
        div {
            div class="text-sm font-semibold text-gray-500 mb-1" { (label) }
            (content)
        }
    }
}

/// Options of the group select of the course form
pub fn group_options(groups: &[Group], selected: &[GroupId]) -> Markup {
    html! {
        @if groups.is_empty() {
            option value="" disabled { (NO_GROUPS) }
        }
        @for group in groups {
            option value=(group.id.0) selected[selected.contains(&group.id)] { (group.name) }
        }
    }
}

/// The add/edit course dialog
pub fn course_form(form: &CourseForm, groups: &[Group]) -> Markup {
    let title = if form.event_id.is_some() {
        "Modifier un cours"
    } else {
        "Ajouter un cours"
    };

    html! {
        div class="modal fixed inset-0 bg-black bg-opacity-50 z-50 flex items-center justify-center p-4" {
            form class="bg-white rounded-2xl shadow-2xl max-w-lg w-full p-6 space-y-4" id="courseForm" {
                h2 class="text-2xl font-bold" { (title) }
                @if let Some(id) = form.event_id {
                    input type="hidden" name="eventId" value=(id.0);
                }
                input type="text" name="courseTitle" value=(form.title) required;
                select name="courseGroup" multiple {
                    (group_options(groups, &form.group_ids))
                }
                input type="date" name="courseDate" value=(optional(form.date.map(|d| d.format("%Y-%m-%d").to_string())));
                input type="text" name="courseDayName" value=(form.day_name().unwrap_or_default()) readonly;
                input type="time" name="courseStartTime" value=(optional(form.start_time.map(|t| t.format("%H:%M").to_string())));
                input type="time" name="courseEndTime" value=(optional(form.end_time.map(|t| t.format("%H:%M").to_string())));
                input type="text" name="courseLocation" value=(form.location);
                textarea name="courseDescription" { (form.description) }
                label {
                    input type="checkbox" name="isRecurring" checked[form.is_recurring];
                    " Cours récurrent"
                }
                div class={ "recurring-options" (if form.is_recurring { "" } else { " hidden" }) } {
                    select name="recurrenceType" {
                        @for kind in &[RecurrenceType::Weekly, RecurrenceType::Biweekly, RecurrenceType::Monthly] {
                            option value=(kind.to_string()) selected[*kind == form.recurrence_type] {
                                (recurrence_label(*kind))
                            }
                        }
                    }
                    input type="date" name="recurrenceEnd" value=(optional(form.recurrence_end.map(|d| d.format("%Y-%m-%d").to_string())));
                }
                div class="flex justify-end space-x-3" {
                    button type="button" data-action="close" { "Annuler" }
                    button type="submit" { "Enregistrer" }
                }
            }
        }
    }
}

fn recurrence_label(kind: RecurrenceType) -> &'static str {
    match kind {
        RecurrenceType::Weekly => "Chaque semaine",
        RecurrenceType::Biweekly => "Toutes les deux semaines",
        RecurrenceType::Monthly => "Chaque mois",
    }
}

fn optional(value: Option<String>) -> String {
    value.unwrap_or_default()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
