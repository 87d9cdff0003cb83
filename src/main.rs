use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use menu_order::config;
use menu_order::domain::cart::{CartStore, ItemId, PriceFormat};
use menu_order::domain::order::Fulfillment;
use menu_order::metrics::Metrics;
use menu_order::presentation::{CartBarView, MenuItemHandle, MenuPage, ModalView, UiCommand};
use menu_order::state::FileStorage;

fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,menu_order=debug"))
        )
        .init();

    tracing::info!("🍕 Starting menu order walk-through");

    // === 1. Settings ===
    let settings = config::load_settings()?;
    tracing::info!(
        storage_key = %settings.storage_key,
        storage_path = %settings.storage_path.display(),
        "Loaded settings"
    );

    // === 2. Metrics ===
    let metrics = Arc::new(Metrics::new()?);
    tracing::info!("📊 Metrics registry created with {} metrics", metrics.registry().gather().len());

    // === 3. Cart store restored from local storage ===
    let storage = FileStorage::new(&settings.storage_path);
    let mut store = CartStore::open(storage, &settings.storage_key, metrics.clone());
    store.subscribe(|change| {
        tracing::info!(
            affected = ?change.affected,
            item_count = change.item_count,
            total = change.total,
            "🛒 Cart changed"
        );
    });

    // === 4. Menu page ===
    let menu = vec![
        MenuItemHandle::new("margherita", "Margherita", "12.50"),
        MenuItemHandle::new("minestrone", "Minestrone", "6.00"),
        MenuItemHandle::new("tiramisu", "Tiramisu", "7.25"),
    ];
    let mut page = MenuPage::new(store, menu, PriceFormat::new(settings.currency_symbol.clone()));
    log_cart_bar(&page);

    // === 5. Build up an order ===
    let margherita = ItemId::from("margherita");
    let tiramisu = ItemId::from("tiramisu");

    page.handle(UiCommand::AddToOrder { id: margherita.clone() });
    page.handle(UiCommand::CardIncrement { id: margherita.clone() });
    page.handle(UiCommand::AddToOrder { id: tiramisu });
    log_cart_bar(&page);

    page.handle(UiCommand::OpenOrder);
    page.handle(UiCommand::ModalDecrement { id: margherita });
    page.handle(UiCommand::SelectFulfillment(Fulfillment::Pickup));

    // === 6. Place it ===
    page.handle(UiCommand::PlaceOrder {
        name: "Walk-through Customer".to_string(),
        phone: "555-0100".to_string(),
        address: None,
    });

    if let ModalView::OrderConfirmed(view) = page.modal().view() {
        tracing::info!(
            order_ref = %view.order_ref,
            name = %view.name,
            item_count = view.item_count,
            total = %view.total,
            "🧾 Showing confirmation"
        );
    }

    page.handle(UiCommand::CloseOrder);
    log_cart_bar(&page);

    tracing::info!(
        orders_placed = metrics.orders_placed.get(),
        storage_failures_write = metrics.storage_failures.with_label_values(&["write"]).get(),
        "🎉 Walk-through complete!"
    );

    Ok(())
}

fn log_cart_bar<S: menu_order::state::KeyValueStorage>(page: &MenuPage<S>) {
    match page.cart_bar().view() {
        CartBarView::Hidden => tracing::info!("Cart bar hidden"),
        CartBarView::Visible { count_label, total_label } => {
            tracing::info!(count = %count_label, total = %total_label, "Cart bar visible")
        }
    }
}
