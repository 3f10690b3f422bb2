//! Forward-only cursor over query results.
//!
//! A cursor owns the executor tree of one query and moves through three
//! states:
//!
//! - **Open**: the executor (and whatever source handle it holds) is alive
//! - **Exhausted**: the executor reported the end and has been dropped
//! - **Closed**: closed by the caller or invalidated by a source error
//!
//! Leaving `Open` always drops the executor, so source resources are released
//! on exhaustion, on `close()` and on drop alike.

use crate::executor::Executor;
use crate::feature::Feature;
use crate::query::{QueryError, QueryResult};
use log::debug;

enum CursorState<'a> {
    Open(Box<dyn Executor + 'a>),
    Exhausted,
    Closed,
}

/// Lazy, single-pass sequence of features.
pub struct Cursor<'a> {
    state: CursorState<'a>,
    /// Feature fetched by `has_next` and not yet handed out
    peeked: Option<Feature>,
    /// Features handed out so far
    yielded: usize,
}

impl<'a> Cursor<'a> {
    /// Initialise the executor and open the cursor
    pub fn open(mut executor: Box<dyn Executor + 'a>) -> QueryResult<Self> {
        executor.init()?;
        Ok(Self {
            state: CursorState::Open(executor),
            peeked: None,
            yielded: 0,
        })
    }

    /// Whether another feature is available. May read from the source.
    pub fn has_next(&mut self) -> QueryResult<bool> {
        if self.peeked.is_some() {
            return Ok(true);
        }
        self.peeked = self.fetch()?;
        Ok(self.peeked.is_some())
    }

    /// Next feature; `NoMoreElements` past the end.
    pub fn next(&mut self) -> QueryResult<Feature> {
        self.try_next()?.ok_or(QueryError::NoMoreElements)
    }

    /// Next feature, or `None` past the end
    pub fn try_next(&mut self) -> QueryResult<Option<Feature>> {
        let feature = match self.peeked.take() {
            Some(feature) => Some(feature),
            None => self.fetch()?,
        };
        if feature.is_some() {
            self.yielded += 1;
        }
        Ok(feature)
    }

    /// Close the cursor and release the source. Idempotent.
    pub fn close(&mut self) {
        if !matches!(self.state, CursorState::Closed) {
            debug!("Closing cursor after {} features", self.yielded);
        }
        self.peeked = None;
        self.state = CursorState::Closed;
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, CursorState::Closed)
    }

    /// Whether the end was reached (a pending peeked feature does not count)
    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, CursorState::Exhausted) && self.peeked.is_none()
    }

    /// Features handed out so far
    pub fn position(&self) -> usize {
        self.yielded
    }

    /// Drain the cursor and count the remaining features
    pub fn size(mut self) -> QueryResult<usize> {
        let mut count = 0;
        while self.try_next()?.is_some() {
            count += 1;
        }
        self.close();
        Ok(count)
    }

    /// Iterate over the remaining features.
    ///
    /// The iterator ends after the first error.
    pub fn features(&mut self) -> Features<'_, 'a> {
        Features {
            cursor: self,
            failed: false,
        }
    }

    fn fetch(&mut self) -> QueryResult<Option<Feature>> {
        let result = match &mut self.state {
            CursorState::Open(executor) => executor.next(),
            CursorState::Exhausted => return Ok(None),
            CursorState::Closed => return Err(QueryError::CursorClosed),
        };

        match result {
            Ok(Some(feature)) => Ok(Some(feature)),
            Ok(None) => {
                debug!("Cursor exhausted after {} features", self.yielded);
                self.state = CursorState::Exhausted;
                Ok(None)
            }
            Err(e) => {
                debug!("Cursor invalidated: {}", e);
                self.state = CursorState::Closed;
                Err(e)
            }
        }
    }
}

/// Iterator adapter returned by [`Cursor::features`]
pub struct Features<'c, 'a> {
    cursor: &'c mut Cursor<'a>,
    failed: bool,
}

impl Iterator for Features<'_, '_> {
    type Item = QueryResult<Feature>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.cursor.try_next() {
            Ok(Some(feature)) => Some(Ok(feature)),
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
