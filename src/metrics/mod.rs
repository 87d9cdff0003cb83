use prometheus::{IntCounter, IntCounterVec, IntGauge, Opts, Registry};

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Cart commands dispatched and commands that turned out to be no-ops
// - Orders placed
// - Storage read/write failures
// - Current cart size
//
// The registry is exposed so an embedding surface can gather and export it.
// ============================================================================

/// Central metrics registry for the cart
pub struct Metrics {
    registry: Registry,

    // Cart Command Metrics
    pub cart_commands: IntCounterVec,
    pub cart_noop_commands: IntCounterVec,

    // Order Metrics
    pub orders_placed: IntCounter,

    // Storage Metrics
    pub storage_failures: IntCounterVec,

    // Cart State
    pub cart_item_count: IntGauge,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let cart_commands = IntCounterVec::new(
            Opts::new("cart_commands_total", "Total cart commands that changed the cart"),
            &["command"],
        )?;
        registry.register(Box::new(cart_commands.clone()))?;

        let cart_noop_commands = IntCounterVec::new(
            Opts::new("cart_noop_commands_total", "Total cart commands that left the cart unchanged"),
            &["command"],
        )?;
        registry.register(Box::new(cart_noop_commands.clone()))?;

        let orders_placed = IntCounter::new("orders_placed_total", "Total orders placed")?;
        registry.register(Box::new(orders_placed.clone()))?;

        let storage_failures = IntCounterVec::new(
            Opts::new("storage_failures_total", "Storage operations that failed and were skipped"),
            &["operation"],
        )?;
        registry.register(Box::new(storage_failures.clone()))?;

        let cart_item_count = IntGauge::new("cart_item_count", "Items currently in the cart")?;
        registry.register(Box::new(cart_item_count.clone()))?;

        Ok(Self {
            registry,
            cart_commands,
            cart_noop_commands,
            orders_placed,
            storage_failures,
            cart_item_count,
        })
    }

    /// Get the Prometheus registry for exporting metrics
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Helper to record a dispatched cart command
    pub fn record_command(&self, command: &str, changed: bool) {
        if changed {
            self.cart_commands.with_label_values(&[command]).inc();
        } else {
            self.cart_noop_commands.with_label_values(&[command]).inc();
        }
    }

    pub fn record_order_placed(&self) {
        self.orders_placed.inc();
    }

    /// Helper to record a skipped storage operation ("read" or "write")
    pub fn record_storage_failure(&self, operation: &str) {
        self.storage_failures.with_label_values(&[operation]).inc();
    }

    pub fn set_cart_item_count(&self, count: u64) {
        self.cart_item_count.set(i64::try_from(count).unwrap_or(i64::MAX));
    }
}
