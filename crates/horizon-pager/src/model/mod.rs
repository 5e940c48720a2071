//! Collaborator interfaces of the page view.
//!
//! A [`PageView`](crate::widget::widgets::PageView) does not own its pages.
//! It asks a [`PageDataSource`] how many pages exist and for the content of
//! each page as it becomes visible, and it reports taps and page switches to
//! a [`PageDelegate`]. Both are held weakly: dropping them is equivalent to
//! unsetting them.

mod delegate;
mod source;

pub use delegate::PageDelegate;
pub use source::{PageContent, PageDataSource};
