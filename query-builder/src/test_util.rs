use parking_lot::Mutex;

use crate::collection::{FindOptions, FindProvider};
use crate::errors::QueryResult;
use crate::selector::Selector;

/// A collection that records every find it receives.
#[derive(Default)]
pub(crate) struct RecordingCollection {
    calls: Mutex<Vec<(Selector, FindOptions)>>,
}

impl RecordingCollection {
    pub(crate) fn new() -> Self {
        RecordingCollection::default()
    }

    pub(crate) fn last_selector(&self) -> Option<Selector> {
        self.calls.lock().last().map(|(selector, _)| selector.clone())
    }

    pub(crate) fn last_options(&self) -> Option<FindOptions> {
        self.calls.lock().last().map(|(_, options)| options.clone())
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl FindProvider for RecordingCollection {
    type Cursor = usize;

    fn find_with_options(
        &self,
        selector: Selector,
        find_options: &FindOptions,
    ) -> QueryResult<usize> {
        let mut calls = self.calls.lock();
        calls.push((selector, find_options.clone()));
        Ok(calls.len())
    }
}
