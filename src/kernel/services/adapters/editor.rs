//! Editors without a surface: they track what they were asked to show.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::core::{Emitter, Subscription};
use crate::kernel::services::ports::{
    CodeEditor, CursorStatus, DiffEditor, LocalBoxFuture, SelectionChange, TextRange,
};
use crate::models::Uri;

#[derive(Default)]
pub struct HeadlessCodeEditor {
    current: RefCell<Option<(Uri, Option<TextRange>)>>,
    focus_count: Cell<usize>,
    layout_count: Cell<usize>,
    cursor: Emitter<CursorStatus>,
    selection: Emitter<SelectionChange>,
    visible_ranges: Emitter<Vec<TextRange>>,
    configuration: Emitter<()>,
}

impl HeadlessCodeEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Uri> {
        self.current.borrow().as_ref().map(|(uri, _)| uri.clone())
    }

    pub fn current_range(&self) -> Option<TextRange> {
        self.current.borrow().as_ref().and_then(|(_, range)| *range)
    }

    pub fn focus_count(&self) -> usize {
        self.focus_count.get()
    }

    pub fn layout_count(&self) -> usize {
        self.layout_count.get()
    }

    /// Simulates the user moving the caret.
    pub fn move_cursor(&self, status: CursorStatus) {
        self.cursor.fire(&status);
    }

    pub fn select(&self, change: SelectionChange) {
        self.selection.fire(&change);
    }

    pub fn scroll(&self, visible: Vec<TextRange>) {
        self.visible_ranges.fire(&visible);
    }

    pub fn reconfigure(&self) {
        self.configuration.fire(&());
    }
}

impl CodeEditor for HeadlessCodeEditor {
    fn open<'a>(&'a self, uri: &'a Uri, range: Option<TextRange>) -> LocalBoxFuture<'a, ()> {
        Box::pin(async move {
            tracing::trace!(uri = %uri, "code editor open");
            *self.current.borrow_mut() = Some((uri.clone(), range));
        })
    }

    fn focus(&self) {
        self.focus_count.set(self.focus_count.get() + 1);
    }

    fn layout(&self) {
        self.layout_count.set(self.layout_count.get() + 1);
    }

    fn on_cursor_change(&self, listener: Box<dyn Fn(&CursorStatus)>) -> Subscription {
        self.cursor.subscribe(listener)
    }

    fn on_selection_change(&self, listener: Box<dyn Fn(&SelectionChange)>) -> Subscription {
        self.selection.subscribe(listener)
    }

    fn on_visible_ranges_change(&self, listener: Box<dyn Fn(&[TextRange])>) -> Subscription {
        self.visible_ranges
            .subscribe(move |ranges: &Vec<TextRange>| listener(ranges.as_slice()))
    }

    fn on_configuration_change(&self, listener: Box<dyn Fn()>) -> Subscription {
        self.configuration.subscribe(move |_| listener())
    }
}

#[derive(Default)]
pub struct HeadlessDiffEditor {
    current: RefCell<Option<(Uri, Uri)>>,
    modified: Rc<HeadlessCodeEditor>,
    focus_count: Cell<usize>,
    layout_count: Cell<usize>,
}

impl HeadlessDiffEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<(Uri, Uri)> {
        self.current.borrow().clone()
    }

    pub fn modified(&self) -> Rc<HeadlessCodeEditor> {
        Rc::clone(&self.modified)
    }

    pub fn focus_count(&self) -> usize {
        self.focus_count.get()
    }

    pub fn layout_count(&self) -> usize {
        self.layout_count.get()
    }
}

impl DiffEditor for HeadlessDiffEditor {
    fn compare<'a>(&'a self, original: &'a Uri, modified: &'a Uri) -> LocalBoxFuture<'a, ()> {
        Box::pin(async move {
            *self.current.borrow_mut() = Some((original.clone(), modified.clone()));
            self.modified.open(modified, None).await;
        })
    }

    fn modified_editor(&self) -> Rc<dyn CodeEditor> {
        self.modified.clone()
    }

    fn focus(&self) {
        self.focus_count.set(self.focus_count.get() + 1);
    }

    fn layout(&self) {
        self.layout_count.set(self.layout_count.get() + 1);
    }
}
