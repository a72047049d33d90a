use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexSet;
use tracing::{debug, trace};

use crate::core::{ChartId, View, ViewChange};

use super::ZoomListener;

/// One view the host should impose on a linked chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedViewUpdate {
    pub target: ChartId,
    /// Chart the view came from; pass it as `set_view` source.
    pub source: ChartId,
    pub view: View,
}

/// Group of charts whose views follow each other.
///
/// Only user-caused changes are propagated. Linked charts apply updates with
/// `caused_by_user = false`, so their own settles are not re-broadcast.
#[derive(Debug, Default)]
pub struct ViewLink {
    members: IndexSet<ChartId>,
    pending: Vec<ViewChange>,
}

impl ViewLink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the chart was already linked.
    pub fn link(&mut self, chart: ChartId) -> bool {
        self.members.insert(chart)
    }

    pub fn unlink(&mut self, chart: &ChartId) -> bool {
        self.members.shift_remove(chart)
    }

    #[must_use]
    pub fn members(&self) -> impl Iterator<Item = &ChartId> {
        self.members.iter()
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn record(&mut self, change: &ViewChange) {
        if !change.caused_by_user {
            trace!(chart = %change.chart, "programmatic view change not propagated");
            return;
        }
        if !self.members.contains(&change.chart) {
            debug!(chart = %change.chart, "view change from unlinked chart ignored");
            return;
        }
        // A newer change from the same chart replaces the queued one.
        self.pending.retain(|queued| queued.chart != change.chart);
        self.pending.push(change.clone());
    }

    /// Fan-out of every queued change to the other members, in link order.
    pub fn drain_updates(&mut self) -> Vec<LinkedViewUpdate> {
        let mut updates = Vec::new();
        for change in self.pending.drain(..) {
            for target in self.members.iter().filter(|member| **member != change.chart) {
                updates.push(LinkedViewUpdate {
                    target: target.clone(),
                    source: change.chart.clone(),
                    view: change.view.clone(),
                });
            }
        }
        updates
    }
}

/// Listener feeding one chart's settles into a shared [`ViewLink`].
pub struct ViewLinkListener {
    id: String,
    link: Rc<RefCell<ViewLink>>,
}

impl ViewLinkListener {
    #[must_use]
    pub fn new(chart: &ChartId, link: Rc<RefCell<ViewLink>>) -> Self {
        Self {
            id: format!("view-link:{chart}"),
            link,
        }
    }
}

impl ZoomListener for ViewLinkListener {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_view_change(&mut self, change: &ViewChange) {
        self.link.borrow_mut().record(change);
    }
}
