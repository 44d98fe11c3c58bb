//! The surface the page controllers draw on
//!
//! Controllers never print anything themselves. They render fragments into named [`Region`]s
//! and ask the user for alerts and confirmations through the [`Ui`] trait.
use displaydoc::Display;
use maud::Markup;

pub mod terminal;

pub use terminal::TerminalUi;

/// Named parts of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum Region {
    /// userName
    UserName,
    /// teacherActions
    TeacherActions,
    /// weekDisplay
    WeekDisplay,
    /// calendarContainer
    CalendarContainer,
    /// groupOptions
    GroupOptions,
    /// courseModal
    CourseModal,
    /// modal
    Modal,
    /// tabs
    Tabs,
    /// messagesContainer
    MessagesContainer,
    /// recipientOptions
    RecipientOptions,
    /// composeModal
    ComposeModal,
}

/// Answer to the delete prompt of a recurring course
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteScope {
    Occurrence,
    Series,
}

impl DeleteScope {
    pub fn is_series(self) -> bool {
        self == DeleteScope::Series
    }
}

pub trait Ui {
    /// Replaces the content of a region
    fn render(&mut self, region: Region, markup: Markup);

    fn clear(&mut self, region: Region);

    /// Blocking notification
    fn alert(&mut self, message: &str);

    /// Yes/no question, `false` cancels the action
    fn confirm(&mut self, question: &str) -> bool;

    /// Asks whether a whole series or one occurrence is deleted, `None` cancels
    fn choose_delete_scope(&mut self, question: &str) -> Option<DeleteScope>;

    /// Leaves the current page
    fn redirect(&mut self, location: &str);
}

impl<U: Ui + ?Sized> Ui for &mut U {
    fn render(&mut self, region: Region, markup: Markup) {
        (**self).render(region, markup)
    }

    fn clear(&mut self, region: Region) {
        (**self).clear(region)
    }

    fn alert(&mut self, message: &str) {
        (**self).alert(message)
    }

    fn confirm(&mut self, question: &str) -> bool {
        (**self).confirm(question)
    }

    fn choose_delete_scope(&mut self, question: &str) -> Option<DeleteScope> {
        (**self).choose_delete_scope(question)
    }

    fn redirect(&mut self, location: &str) {
        (**self).redirect(location)
    }
}
