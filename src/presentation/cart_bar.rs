use crate::domain::cart::{Cart, PriceFormat};

// ============================================================================
// Cart Bar Presenter - aggregate count and total
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartBarView {
    Hidden,
    Visible { count_label: String, total_label: String },
}

#[derive(Debug, Clone)]
pub struct CartBarPresenter {
    format: PriceFormat,
    view: CartBarView,
}

impl CartBarPresenter {
    pub fn new(format: PriceFormat) -> Self {
        Self {
            format,
            view: CartBarView::Hidden,
        }
    }

    pub fn sync(&mut self, cart: &Cart) {
        let count = cart.item_count();
        self.view = if count == 0 {
            CartBarView::Hidden
        } else {
            CartBarView::Visible {
                count_label: count_label(count),
                total_label: self.format.format(cart.total()),
            }
        };
    }

    pub fn view(&self) -> &CartBarView {
        &self.view
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.view, CartBarView::Visible { .. })
    }
}

/// "1 item" / "N items"
pub fn count_label(count: u64) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{count} items")
    }
}
