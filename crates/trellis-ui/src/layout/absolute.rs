use serde::{Deserialize, Serialize};
use trellis_dom::{DomError, DomFacade};

use crate::{ComponentId, Ui};

/// Children are switched to `position: absolute` and appended to the
/// container in list order. Coordinates are left to the caller (see
/// [`Ui::place`]); resizing the container moves nothing.
///
/// The bar, border and card strategies all start from this one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsoluteLayout {}

impl AbsoluteLayout {
    /// Construct the strategy.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Position and append every present child.
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
        Self::arrange(ui, container, &children)
    }

    /// Nothing depends on the container's size.
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn on_resize<D: DomFacade>(
        &mut self,
        _ui: &mut Ui<D>,
        _container: ComponentId,
    ) -> Result<(), DomError> {
        Ok(())
    }

    /// Make `children` absolutely positioned children of `host`, in order.
    pub(crate) fn arrange<D: DomFacade>(
        ui: &mut Ui<D>,
        host: ComponentId,
        children: &[ComponentId],
    ) -> Result<(), DomError> {
        for &child in children {
            ui.set_style_property(child, "position", "absolute")?;
            ui.append_into(host, child)?;
        }
        Ok(())
    }
}
