use crate::clients::{AccountClient, CategoryClient, OrderClient, ProductClient};
use crate::collaborators::{
    Collaborators, JsonFileWishlistStorage, MemoryWishlistStorage, WishlistStorage,
};
use crate::lifecycle::EngineConfig;
use std::sync::Arc;
use tracing::{error, info};

/// Runs the in-memory stores of record the storefront talks to.
///
/// `StoreSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the product, order, account and category actors
/// - **Wiring**: Bundling their clients and the wishlist storage into [`Collaborators`]
///
/// # Example
///
/// ```ignore
/// let config = EngineConfig::from_env()?;
/// let system = StoreSystem::new(&config);
/// let mut storefront = Storefront::new(config, system.collaborators());
/// storefront.start().await;
/// // ...
/// drop(storefront);
/// system.shutdown().await?;
/// ```
pub struct StoreSystem {
    pub product_client: ProductClient,
    pub order_client: OrderClient,
    pub account_client: AccountClient,
    pub category_client: CategoryClient,
    pub wishlist: Arc<dyn WishlistStorage>,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StoreSystem {
    /// Spawns every store actor with the configured mailbox size. Must be called inside a
    /// Tokio runtime.
    pub fn new(config: &EngineConfig) -> Self {
        let capacity = config.channel_capacity;

        let (product_actor, product_client) = crate::product_actor::new(capacity);
        let (order_actor, order_client) = crate::order_actor::new(capacity);
        let (account_actor, account_client) = crate::account_actor::new(capacity);
        let (category_actor, category_client) = crate::category_actor::new(capacity);

        let handles = vec![
            tokio::spawn(product_actor.run(())),
            tokio::spawn(order_actor.run(())),
            tokio::spawn(account_actor.run(())),
            tokio::spawn(category_actor.run(())),
        ];

        let wishlist: Arc<dyn WishlistStorage> = match &config.wishlist_path {
            Some(path) => {
                info!(path = %path.display(), "Wishlist stored on disk");
                Arc::new(JsonFileWishlistStorage::new(path.clone()))
            }
            None => Arc::new(MemoryWishlistStorage::new()),
        };

        info!(capacity, "Store system started");
        Self {
            product_client,
            order_client,
            account_client,
            category_client,
            wishlist,
            handles,
        }
    }

    /// Handles for a [`Storefront`](crate::engine::Storefront). They share the actors'
    /// channels, so every bundle must be dropped before [`StoreSystem::shutdown`] can finish.
    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            products: Arc::new(self.product_client.clone()),
            orders: Arc::new(self.order_client.clone()),
            identity: Arc::new(self.account_client.clone()),
            categories: Arc::new(self.category_client.clone()),
            wishlist: self.wishlist.clone(),
        }
    }

    /// Drops the clients and waits for every actor to stop.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all actors shut down cleanly
    /// - `Err(String)` if any actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down store system...");

        drop(self.product_client);
        drop(self.order_client);
        drop(self.account_client);
        drop(self.category_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Store system shutdown complete.");
        Ok(())
    }
}
