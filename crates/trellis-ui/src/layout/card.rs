use serde::{Deserialize, Serialize};
use trellis_dom::{DomError, DomFacade};

use super::bar::BarLayout;
use crate::{ComponentId, Ui};

/// A stack of cards with only the top (last) one visible.
///
/// Every other child is detached from the document. The visible card is
/// aligned and fitted to the whole content box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardLayout {
    #[serde(skip, default = "CardLayout::stretch")]
    bar: BarLayout,
}

impl Default for CardLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl CardLayout {
    /// Construct the strategy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bar: Self::stretch(),
        }
    }

    fn stretch() -> BarLayout {
        BarLayout::horizontal().with_align(true).with_fit(true)
    }

    /// Detach every child but the last and fill the container with it.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn do_layout<D: DomFacade>(
        &mut self,
        ui: &mut Ui<D>,
        container: ComponentId,
    ) -> Result<(), DomError> {
        let children = ui.child_widgets(container);
        let Some((&top, hidden)) = children.split_last() else {
            return Ok(());
        };
        for &card in hidden {
            let _ = ui.detach(card)?;
        }
        self.bar.arrange(ui, container, &[top])
    }

    /// Re-fit the visible card.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn on_resize<D: DomFacade>(
        &mut self,
        ui: &mut Ui<D>,
        container: ComponentId,
    ) -> Result<(), DomError> {
        match ui.child_widgets(container).last() {
            Some(&top) => self.bar.rearrange(ui, container, &[top]),
            None => Ok(()),
        }
    }

    /// Give a departing card back its natural width.
    ///
    /// # Errors
    ///
    /// Propagates document failures.
    pub fn release<D: DomFacade>(
        &mut self,
        ui: &mut Ui<D>,
        card: ComponentId,
    ) -> Result<(), DomError> {
        self.bar.release(ui, card)
    }
}
