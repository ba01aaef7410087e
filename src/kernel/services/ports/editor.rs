//! Handles to the native editors a group renders into.

use std::rc::Rc;

use super::runtime::LocalBoxFuture;
use crate::core::Subscription;
use crate::models::Uri;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub start: Position,
    pub end: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorStatus {
    pub position: Option<Position>,
    pub selection_length: usize,
}

/// New selection set of an editor and what caused it (`keyboard`, `mouse`,
/// `api`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub selections: Vec<TextRange>,
    pub source: String,
}

pub trait CodeEditor {
    fn open<'a>(&'a self, uri: &'a Uri, range: Option<TextRange>) -> LocalBoxFuture<'a, ()>;

    fn focus(&self);

    fn layout(&self);

    fn on_cursor_change(&self, listener: Box<dyn Fn(&CursorStatus)>) -> Subscription;

    fn on_selection_change(&self, listener: Box<dyn Fn(&SelectionChange)>) -> Subscription;

    fn on_visible_ranges_change(&self, listener: Box<dyn Fn(&[TextRange])>) -> Subscription;

    /// Editor options (tab size, wrapping, ...) changed.
    fn on_configuration_change(&self, listener: Box<dyn Fn()>) -> Subscription;
}

pub trait DiffEditor {
    fn compare<'a>(&'a self, original: &'a Uri, modified: &'a Uri) -> LocalBoxFuture<'a, ()>;

    /// The editable right-hand side.
    fn modified_editor(&self) -> Rc<dyn CodeEditor>;

    fn focus(&self);

    fn layout(&self);
}
