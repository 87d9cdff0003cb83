// ============================================================================
// Presentation Layer
// ============================================================================
//
// Presenters hold no state of their own beyond what they last read from the
// cart. The page routes UI commands and refresh instructions between them.
//
// ============================================================================

pub mod card;
pub mod cart_bar;
pub mod order_modal;
pub mod page;
pub mod refresh;

pub use card::{CardPresenter, CardView, MenuItemHandle};
pub use cart_bar::{CartBarPresenter, CartBarView};
pub use order_modal::{ConfirmationView, ModalView, OrderEntryView, OrderLineView, OrderModalPresenter};
pub use page::{MenuPage, UiCommand};
pub use refresh::Refresh;
