//! Product list page: load, paginate, create/edit, delete, assign a category.

use super::{Notice, Outcome, failure_text};
use crate::{
    client::{ApiClient, SubmitKind},
    config::AppConfig,
    entities::ProductModel,
    pagination::{PageControl, Paginator},
    validation::{FieldErrors, ProductForm},
};
use tracing::{error, info, instrument};

/// State of the product list page.
#[derive(Debug)]
pub struct ProductBoard {
    client: ApiClient,
    products: Vec<ProductModel>,
    paginator: Paginator,
    form_errors: FieldErrors,
    notices: Vec<Notice>,
    loading: bool,
}

impl ProductBoard {
    #[must_use]
    pub fn new(client: ApiClient, page_size: usize) -> Self {
        Self {
            client,
            products: Vec::new(),
            paginator: Paginator::new(0, page_size),
            form_errors: FieldErrors::new(),
            notices: Vec::new(),
            loading: false,
        }
    }

    /// A board talking to the configured API, with the configured page size.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(ApiClient::from_config(&config.client), config.board.page_size)
    }

    /// Every loaded product that is not flagged as removed.
    #[must_use]
    pub fn products(&self) -> &[ProductModel] {
        &self.products
    }

    /// Products on the current page.
    #[must_use]
    pub fn visible(&self) -> &[ProductModel] {
        self.paginator.window(&self.products)
    }

    #[must_use]
    pub const fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    #[must_use]
    pub fn pages(&self) -> Vec<PageControl> {
        self.paginator.pages()
    }

    pub const fn previous_page(&mut self) -> usize {
        self.paginator.previous()
    }

    pub const fn next_page(&mut self) -> usize {
        self.paginator.next()
    }

    pub fn select_page(&mut self, page: usize) -> usize {
        self.paginator.select(page)
    }

    /// Errors of the last rejected product form.
    #[must_use]
    pub const fn form_errors(&self) -> &FieldErrors {
        &self.form_errors
    }

    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Hands the pending notices over, leaving none behind.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// A form pre-filled with a loaded product, for editing.
    #[must_use]
    pub fn edit_form(&self, product_id: i64) -> Option<ProductForm> {
        self.products
            .iter()
            .find(|product| product.id == product_id)
            .map(ProductForm::from_product)
    }

    /// Fetches the product list.
    ///
    /// On failure the previously loaded products stay as they were.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Outcome<usize> {
        self.loading = true;
        let outcome = match self.client.list_products().await {
            Ok(products) => {
                self.products = products.into_iter().filter(|p| !p.is_removed).collect();
                self.paginator.set_total_items(self.products.len());
                Outcome::Done(self.products.len())
            }
            Err(err) => {
                error!("Failed to load products: {err}");
                self.notices.push(
                    Notice::error("Could not load products").with_description(failure_text(&err)),
                );
                Outcome::Failed(err)
            }
        };
        self.loading = false;
        outcome
    }

    /// Validates and submits a product form, then reloads the list.
    ///
    /// A form with an id updates that product; one without creates a new product.
    #[instrument(skip(self, form))]
    pub async fn save_product(&mut self, form: &ProductForm) -> Outcome<SubmitKind> {
        self.form_errors = FieldErrors::new();
        let draft = match form.validate() {
            Ok(draft) => draft,
            Err(errors) => {
                self.form_errors = errors.clone();
                return Outcome::Invalid(errors);
            }
        };

        self.loading = true;
        let outcome = match self.client.submit_product(&draft).await {
            Ok(submitted) => {
                let title = match submitted.kind {
                    SubmitKind::Created => "Product created",
                    SubmitKind::Updated => "Product updated",
                };
                info!(kind = ?submitted.kind, "Product saved");
                self.notices.push(Notice::success(title));
                Outcome::Done(submitted.kind)
            }
            Err(err) => {
                error!("Failed to save product: {err}");
                self.notices.push(Notice::error(failure_text(&err)));
                Outcome::Failed(err)
            }
        };
        self.loading = false;

        if outcome.is_done() {
            self.load().await;
        }
        outcome
    }

    /// Deletes (soft deletes) a product, then reloads the list.
    #[instrument(skip(self))]
    pub async fn delete_product(&mut self, product_id: i64) -> Outcome<()> {
        self.loading = true;
        let outcome = match self.client.delete_product(product_id).await {
            Ok(()) => {
                self.notices.push(Notice::success("Deleted successfully"));
                Outcome::Done(())
            }
            Err(err) => {
                error!("Failed to delete product {product_id}: {err}");
                self.notices.push(Notice::error(failure_text(&err)));
                Outcome::Failed(err)
            }
        };
        self.loading = false;

        if outcome.is_done() {
            self.load().await;
        }
        outcome
    }

    /// Assigns a category to a product, updating the loaded copy on success.
    #[instrument(skip(self))]
    pub async fn assign_category(&mut self, product_id: i64, category_id: i64) -> Outcome<()> {
        self.loading = true;
        let outcome = match self.client.assign_category(product_id, category_id).await {
            Ok(updated) => {
                if let Some(loaded) = self.products.iter_mut().find(|p| p.id == product_id) {
                    loaded.category_id = updated.map_or(Some(category_id), |p| p.category_id);
                }
                self.notices.push(Notice::success("Category assigned"));
                Outcome::Done(())
            }
            Err(err) => {
                error!("Failed to assign category {category_id} to product {product_id}: {err}");
                self.notices
                    .push(Notice::error("Could not assign the category to the product"));
                Outcome::Failed(err)
            }
        };
        self.loading = false;
        outcome
    }
}
