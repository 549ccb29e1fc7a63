//! Catalog browsing: categories, paged products, and a client-side name
//! filter.

use std::time::Duration;

use shopfront_api::{ApiClient, ApiError, CacheGuess};
use shopfront_core::models::average_rating;
use shopfront_core::{filter_by_name, Category, PageWindow, Product, Review};

/// Page size used when pulling whole collections (categories, reviews).
const BULK_PAGE_SIZE: u32 = 100;

/// Browser state for one catalog session.
///
/// Categories are fetched once. Products are re-fetched whenever the page or
/// the category filter changes. The search term never triggers a fetch; it
/// only narrows the page already loaded.
#[derive(Debug)]
pub struct CatalogBrowser {
    categories: Option<Vec<Category>>,
    category_filter: Option<i64>,
    window: PageWindow,
    products: Vec<Product>,
    search: String,
    last_fetch: Option<Duration>,
}

impl CatalogBrowser {
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            categories: None,
            category_filter: None,
            window: PageWindow::new(1, page_size),
            products: Vec::new(),
            search: String::new(),
            last_fetch: None,
        }
    }

    /// Start with a category filter already applied. Nothing is fetched.
    #[must_use]
    pub fn with_category(mut self, category_id: Option<i64>) -> Self {
        self.category_filter = category_id;
        self
    }

    /// Fetch categories on first call; later calls return the cached list.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the category listing.
    pub async fn categories(&mut self, api: &ApiClient) -> Result<&[Category], ApiError> {
        if self.categories.is_none() {
            let fetched = api.list_all::<Category>(BULK_PAGE_SIZE).await?;
            tracing::debug!(count = fetched.len(), "loaded categories");
            self.categories = Some(fetched);
        }
        Ok(self.categories.as_deref().unwrap_or_default())
    }

    /// Jump to `page` (1-based) and fetch it.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`]; the previously loaded page stays in place.
    pub async fn go_to_page(&mut self, api: &ApiClient, page: u32) -> Result<(), ApiError> {
        let window = PageWindow::new(page, self.window.page_size);
        self.fetch(api, window).await
    }

    /// Change the category filter and reload from page 1.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`]; on failure the old filter and page are kept.
    pub async fn set_category(
        &mut self,
        api: &ApiClient,
        category_id: Option<i64>,
    ) -> Result<(), ApiError> {
        let previous = self.category_filter;
        self.category_filter = category_id;
        let window = PageWindow::new(1, self.window.page_size);
        if let Err(e) = self.fetch(api, window).await {
            self.category_filter = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Advance one page. Does nothing and returns `false` when the last page
    /// came back short.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`].
    pub async fn next_page(&mut self, api: &ApiClient) -> Result<bool, ApiError> {
        if !self.window.has_next() {
            return Ok(false);
        }
        self.go_to_page(api, self.window.page + 1).await?;
        Ok(true)
    }

    /// Go back one page. Does nothing and returns `false` on page 1.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`].
    pub async fn previous_page(&mut self, api: &ApiClient) -> Result<bool, ApiError> {
        if !self.window.has_previous() {
            return Ok(false);
        }
        self.go_to_page(api, self.window.page - 1).await?;
        Ok(true)
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.trim().to_string();
    }

    /// Products on the loaded page that match the search term.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        filter_by_name(&self.products, &self.search)
    }

    #[must_use]
    pub fn window(&self) -> PageWindow {
        self.window
    }

    #[must_use]
    pub fn category_filter(&self) -> Option<i64> {
        self.category_filter
    }

    /// Latency-based guess for the last page fetch.
    #[must_use]
    pub fn last_cache_guess(&self, threshold: Duration) -> Option<CacheGuess> {
        self.last_fetch
            .map(|elapsed| CacheGuess::from_latency(elapsed, threshold))
    }

    async fn fetch(&mut self, api: &ApiClient, window: PageWindow) -> Result<(), ApiError> {
        let mut filters = Vec::new();
        if let Some(category_id) = self.category_filter {
            filters.push(("category_id", category_id.to_string()));
        }

        let timed = api
            .list_timed::<Product>(window.offset(), window.limit(), &filters)
            .await?;

        tracing::debug!(
            page = window.page,
            count = timed.value.len(),
            elapsed_ms = u64::try_from(timed.elapsed.as_millis()).unwrap_or(u64::MAX),
            "fetched product page"
        );

        self.window = window.with_count(timed.value.len());
        self.products = timed.value;
        self.last_fetch = Some(timed.elapsed);
        Ok(())
    }
}

/// A product with its reviews.
#[derive(Debug, Clone)]
pub struct ProductDetail {
    pub product: Product,
    pub category: Option<Category>,
    pub reviews: Vec<Review>,
    pub average_rating: Option<f32>,
}

/// Fetch one product, its category and its reviews.
///
/// Reviews are filtered client-side from the full review listing. A missing
/// category is tolerated and reported as `None`.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] for an unknown product and propagates other
/// [`ApiError`]s.
pub async fn product_detail(api: &ApiClient, product_id: i64) -> Result<ProductDetail, ApiError> {
    let product = api.get::<Product>(product_id).await?;

    let category = match api.get::<Category>(product.category_id).await {
        Ok(category) => Some(category),
        Err(e) if e.is_not_found() => None,
        Err(e) => return Err(e),
    };

    let reviews: Vec<Review> = api
        .list_all::<Review>(BULK_PAGE_SIZE)
        .await?
        .into_iter()
        .filter(|r| r.product_id == product_id)
        .collect();

    Ok(ProductDetail {
        average_rating: average_rating(&reviews),
        product,
        category,
        reviews,
    })
}
