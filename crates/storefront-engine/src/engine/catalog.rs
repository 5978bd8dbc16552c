//! # Catalog Mirror
//!
//! A read-through copy of the product store and the category registry. [`Catalog::refresh`]
//! replaces the whole product list; nothing is merged. Browsing and search are pure
//! projections over the mirror through [`CatalogQuery`].
//!
//! The operator write path goes to the collaborator first and only reflects its answer
//! locally, so a failed write leaves the mirror untouched.

use crate::collaborators::{CategoryRegistry, ProductStore};
use crate::engine::error::StorefrontError;
use crate::model::{Product, ProductDraft, ProductId, ProductPatch, ProductRecord, FALLBACK_CATEGORIES};
use crate::product_actor::ProductError;
use tracing::{info, warn};

/// Label of the category option that disables the category filter.
pub const ALL_CATEGORIES: &str = "All";

/// Number of upcoming products the home page shows.
pub const FEATURED_LIMIT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Mirror order, as the store listed the products.
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    /// Reverse identifier order.
    Newest,
}

/// A browse or search request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Exact category name. `None` or `"All"` matches every category.
    pub category: Option<String>,
    pub text: String,
    pub upcoming_only: bool,
    pub in_stock_only: bool,
    pub sort: SortOrder,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn upcoming_only(mut self) -> Self {
        self.upcoming_only = true;
        self
    }

    pub fn in_stock_only(mut self) -> Self {
        self.in_stock_only = true;
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Search by the keywords an image recognizer produced, joined into one phrase.
    pub fn from_image_keywords<S: AsRef<str>>(keywords: &[S]) -> Self {
        let text = keywords
            .iter()
            .map(|k| k.as_ref().trim())
            .filter(|k| !k.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Self::new().text(text)
    }

    fn matches(&self, product: &Product) -> bool {
        let category_ok = match self.category.as_deref() {
            None | Some(ALL_CATEGORIES) => true,
            Some(wanted) => product.category == wanted,
        };
        category_ok
            && product.matches_text(&self.text)
            && (!self.upcoming_only || product.upcoming)
            && (!self.in_stock_only || !product.out_of_stock)
    }
}

#[derive(Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the mirror with what the store lists now.
    ///
    /// Records that cannot be normalized are skipped. If the store call fails the previous
    /// mirror is kept and the error is returned.
    pub async fn refresh(&mut self, store: &dyn ProductStore) -> Result<usize, ProductError> {
        let records = match store.list().await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, kept = self.products.len(), "Catalog refresh failed");
                return Err(e);
            }
        };
        self.products = records.into_iter().filter_map(normalize_or_skip).collect();
        info!(count = self.products.len(), "Catalog refreshed");
        Ok(self.products.len())
    }

    /// Loads the category names, falling back to the built-in list when the registry is
    /// empty or unreachable.
    pub async fn refresh_categories(&mut self, registry: &dyn CategoryRegistry) {
        match registry.list().await {
            Ok(names) if !names.is_empty() => {
                info!(count = names.len(), "Categories refreshed");
                self.categories = names;
            }
            Ok(_) => {
                info!("Category registry empty, using fallback list");
                self.categories = fallback_categories();
            }
            Err(e) => {
                warn!(error = %e, "Category registry unavailable, using fallback list");
                self.categories = fallback_categories();
            }
        }
    }

    /// Known categories. The fallback list until categories have been loaded.
    pub fn categories(&self) -> Vec<String> {
        if self.categories.is_empty() {
            fallback_categories()
        } else {
            self.categories.clone()
        }
    }

    /// Options for the category filter control, "All" first.
    pub fn category_options(&self) -> Vec<String> {
        std::iter::once(ALL_CATEGORIES.to_string())
            .chain(self.categories())
            .collect()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn query(&self, query: &CatalogQuery) -> Vec<&Product> {
        let mut found: Vec<&Product> = self.products.iter().filter(|p| query.matches(p)).collect();
        match query.sort {
            SortOrder::Relevance => {}
            SortOrder::PriceAsc => found.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceDesc => found.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOrder::Newest => found.sort_by(|a, b| b.id.cmp(&a.id)),
        }
        found
    }

    /// Upcoming products for the home page, at most `limit`.
    pub fn featured(&self, limit: usize) -> Vec<&Product> {
        self.products.iter().filter(|p| p.upcoming).take(limit).collect()
    }

    pub async fn create_product(
        &mut self,
        store: &dyn ProductStore,
        draft: ProductDraft,
    ) -> Result<Product, StorefrontError> {
        let product = store.create(draft).await?.normalize()?;
        info!(product_id = %product.id, "Product created");
        self.products.push(product.clone());
        Ok(product)
    }

    pub async fn update_product(
        &mut self,
        store: &dyn ProductStore,
        id: &ProductId,
        patch: ProductPatch,
    ) -> Result<Product, StorefrontError> {
        let product = store.update(id, patch).await?.normalize()?;
        match self.products.iter_mut().find(|p| &p.id == id) {
            Some(existing) => *existing = product.clone(),
            None => self.products.push(product.clone()),
        }
        info!(product_id = %id, "Product updated");
        Ok(product)
    }

    /// Deletes remotely, then drops the local copy. Returns whether the store had it.
    pub async fn delete_product(
        &mut self,
        store: &dyn ProductStore,
        id: &ProductId,
    ) -> Result<bool, StorefrontError> {
        let existed = store.delete(id).await?;
        self.products.retain(|p| &p.id != id);
        info!(product_id = %id, existed, "Product deleted");
        Ok(existed)
    }

    pub async fn create_category(
        &mut self,
        registry: &dyn CategoryRegistry,
        name: &str,
    ) -> Result<String, StorefrontError> {
        let created = registry.create(name).await?;
        if self.categories.is_empty() {
            self.categories = fallback_categories();
        }
        if !self.categories.contains(&created) {
            self.categories.push(created.clone());
        }
        info!(category = %created, "Category created");
        Ok(created)
    }
}

fn normalize_or_skip(record: ProductRecord) -> Option<Product> {
    let id = record.id.clone();
    match record.normalize() {
        Ok(product) => Some(product),
        Err(e) => {
            warn!(product_id = %id, error = %e, "Skipping product record");
            None
        }
    }
}

fn fallback_categories() -> Vec<String> {
    FALLBACK_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category_actor::CategoryError;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeStore {
        records: Mutex<Vec<ProductRecord>>,
        offline: bool,
    }

    #[async_trait]
    impl ProductStore for FakeStore {
        async fn list(&self) -> Result<Vec<ProductRecord>, ProductError> {
            if self.offline {
                return Err(ProductError::from("offline".to_string()));
            }
            Ok(self.records.lock().unwrap().clone())
        }

        async fn create(&self, draft: ProductDraft) -> Result<ProductRecord, ProductError> {
            let mut records = self.records.lock().unwrap();
            let id = ProductId::from(records.len() as u32 + 1);
            let mut record = record(id.as_str(), 0, &draft.category, &draft.tags.join(","));
            record.name = draft.name;
            record.price = draft.price;
            record.images = draft.images;
            records.push(record.clone());
            Ok(record)
        }

        async fn update(&self, id: &ProductId, patch: ProductPatch) -> Result<ProductRecord, ProductError> {
            let mut records = self.records.lock().unwrap();
            let record = records
                .iter_mut()
                .find(|r| r.id == id.as_str())
                .ok_or_else(|| ProductError::NotFound(id.to_string()))?;
            if let Some(price) = patch.price {
                record.price = price;
            }
            Ok(record.clone())
        }

        async fn delete(&self, id: &ProductId) -> Result<bool, ProductError> {
            let mut records = self.records.lock().unwrap();
            let before = records.len();
            records.retain(|r| r.id != id.as_str());
            Ok(records.len() != before)
        }
    }

    struct Registry(Result<Vec<String>, CategoryError>);

    #[async_trait]
    impl CategoryRegistry for Registry {
        async fn list(&self) -> Result<Vec<String>, CategoryError> {
            self.0.clone()
        }

        async fn create(&self, name: &str) -> Result<String, CategoryError> {
            Ok(name.to_string())
        }
    }

    fn record(id: &str, price: i64, category: &str, tag: &str) -> ProductRecord {
        ProductRecord {
            id: id.to_string(),
            name: format!("Item {id}"),
            price: Decimal::new(price, 0),
            category: category.to_string(),
            image: Some(format!("{id}.jpg")),
            images: Vec::new(),
            description: String::new(),
            rating: None,
            reviews: None,
            tags: vec![tag.to_string()],
            is_upcoming: None,
            is_out_of_stock: None,
        }
    }

    fn seeded() -> FakeStore {
        let mut upcoming = record("prod_0000000002", 50, "Fashion", "denim");
        upcoming.is_upcoming = Some(true);
        let mut sold_out = record("prod_0000000003", 300, "Home", "lamp");
        sold_out.is_out_of_stock = Some(true);
        let mut broken = record("prod_0000000004", 10, "Home", "broken");
        broken.image = None;
        FakeStore {
            records: Mutex::new(vec![
                record("prod_0000000001", 120, "Electronics", "wireless"),
                upcoming,
                sold_out,
                broken,
            ]),
            offline: false,
        }
    }

    #[tokio::test]
    async fn refresh_replaces_and_skips_bad_records() {
        let store = seeded();
        let mut catalog = Catalog::new();
        assert_eq!(catalog.refresh(&store).await.unwrap(), 3);
        assert!(catalog.get(&ProductId::from("prod_0000000004")).is_none());

        store.records.lock().unwrap().remove(0);
        catalog.refresh(&store).await.unwrap();
        assert!(catalog.get(&ProductId::from("prod_0000000001")).is_none());
        assert_eq!(catalog.len(), 2);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_last_known_state() {
        let mut catalog = Catalog::new();
        catalog.refresh(&seeded()).await.unwrap();
        let offline = FakeStore {
            offline: true,
            ..FakeStore::default()
        };
        assert!(catalog.refresh(&offline).await.is_err());
        assert_eq!(catalog.len(), 3);
    }

    #[tokio::test]
    async fn query_filters_and_sorts() {
        let mut catalog = Catalog::new();
        catalog.refresh(&seeded()).await.unwrap();

        let all = catalog.query(&CatalogQuery::new().category(ALL_CATEGORIES));
        assert_eq!(all.len(), 3);

        let home = catalog.query(&CatalogQuery::new().category("Home"));
        assert_eq!(home.len(), 1);

        let tagged = catalog.query(&CatalogQuery::new().text("WIRE"));
        assert_eq!(tagged[0].id, ProductId::from("prod_0000000001"));

        let newest: Vec<&str> = catalog
            .query(&CatalogQuery::new().sort(SortOrder::Newest))
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(newest, vec!["prod_0000000003", "prod_0000000002", "prod_0000000001"]);

        let cheapest = catalog.query(&CatalogQuery::new().sort(SortOrder::PriceAsc));
        assert_eq!(cheapest[0].price, Decimal::new(50, 0));
        let dearest = catalog.query(&CatalogQuery::new().sort(SortOrder::PriceDesc));
        assert_eq!(dearest[0].price, Decimal::new(300, 0));

        assert_eq!(catalog.query(&CatalogQuery::new().in_stock_only()).len(), 2);
        assert_eq!(catalog.query(&CatalogQuery::new().upcoming_only()).len(), 1);
        assert_eq!(catalog.featured(FEATURED_LIMIT).len(), 1);
    }

    #[tokio::test]
    async fn image_keywords_become_a_phrase() {
        let query = CatalogQuery::from_image_keywords(&["denim", " ", "jacket"]);
        assert_eq!(query.text, "denim jacket");
        let single = CatalogQuery::from_image_keywords(&["lamp"]);
        let mut catalog = Catalog::new();
        catalog.refresh(&seeded()).await.unwrap();
        assert_eq!(catalog.query(&single).len(), 1);
    }

    #[tokio::test]
    async fn categories_fall_back_when_empty_or_unavailable() {
        let mut catalog = Catalog::new();
        catalog.refresh_categories(&Registry(Ok(vec![]))).await;
        assert_eq!(catalog.categories(), fallback_categories());

        catalog
            .refresh_categories(&Registry(Ok(vec!["Toys".to_string()])))
            .await;
        assert_eq!(catalog.category_options(), vec!["All", "Toys"]);

        catalog
            .refresh_categories(&Registry(Err(CategoryError::from("down".to_string()))))
            .await;
        assert_eq!(catalog.categories().len(), 4);
    }

    #[tokio::test]
    async fn write_path_reflects_store_answers() {
        let store = seeded();
        let mut catalog = Catalog::new();
        catalog.refresh(&store).await.unwrap();

        let created = catalog
            .create_product(
                &store,
                ProductDraft {
                    name: "Desk".to_string(),
                    price: Decimal::new(900, 0),
                    category: "Home".to_string(),
                    images: vec!["desk.jpg".to_string()],
                    ..ProductDraft::default()
                },
            )
            .await
            .unwrap();
        assert!(catalog.get(&created.id).is_some());

        let patch = ProductPatch {
            price: Some(Decimal::new(99, 0)),
            ..ProductPatch::default()
        };
        let id = ProductId::from("prod_0000000001");
        catalog.update_product(&store, &id, patch).await.unwrap();
        assert_eq!(catalog.get(&id).unwrap().price, Decimal::new(99, 0));

        let missing = ProductId::from("nope");
        let err = catalog
            .update_product(&store, &missing, ProductPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StorefrontError::Product(ProductError::NotFound(_))));
        assert!(catalog.get(&missing).is_none());

        assert!(catalog.delete_product(&store, &id).await.unwrap());
        assert!(catalog.get(&id).is_none());
    }
}
