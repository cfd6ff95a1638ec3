//! In-memory repository used by the service tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::cart::{
    Cart, CartCost, CartLine, CartLineInput, CartLineUpdate, CartMerchandise, CartProduct,
};
use crate::domain::collection::Collection;
use crate::domain::content::{BestProductPoster, HeroItem, Page, PromoBanner};
use crate::domain::facets::FilterFacets;
use crate::domain::menu::{CategoriesAndBrands, MenuItem, SubcategoryGroup};
use crate::domain::page_info::{PageInfo, PageRequest};
use crate::domain::product::{Money, Product, ProductPage};
use crate::repository::{
    CartReader, CartWriter, CatalogReader, CollectionProductsQuery, ContentReader,
    NavigationReader, ProductListQuery, RepositoryResult, ShopifyError,
};

/// Repository serving fixed data, paging by index cursors.
#[derive(Debug, Default)]
pub struct FakeRepository {
    pub products: Vec<Product>,
    pub collections: HashMap<String, Vec<Product>>,
    pub filter_summary: FilterFacets,
    pub menu: Vec<MenuItem>,
    pub categories_and_brands: CategoriesAndBrands,
    pub subcategories: Option<SubcategoryGroup>,
    pub pages: Vec<Page>,
    pub hero_items: Vec<HeroItem>,
    pub promo_banner: Option<PromoBanner>,
    pub page_size: usize,
    /// Names of the operations that should fail.
    pub failing: Mutex<Vec<&'static str>>,
    pub product_queries: Mutex<Vec<ProductListQuery>>,
    pub collection_queries: Mutex<Vec<CollectionProductsQuery>>,
    pub carts: Mutex<HashMap<String, Cart>>,
}

impl FakeRepository {
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products,
            page_size: 18,
            ..Self::default()
        }
    }

    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().expect("lock").push(operation);
    }

    pub fn recover(&self, operation: &'static str) {
        self.failing.lock().expect("lock").retain(|name| *name != operation);
    }

    fn check(&self, operation: &'static str) -> RepositoryResult<()> {
        if self.failing.lock().expect("lock").contains(&operation) {
            return Err(ShopifyError::MissingData {
                operation: operation.to_string(),
            });
        }
        Ok(())
    }

    pub fn recorded_product_queries(&self) -> Vec<ProductListQuery> {
        self.product_queries.lock().expect("lock").clone()
    }

    pub fn recorded_collection_queries(&self) -> Vec<CollectionProductsQuery> {
        self.collection_queries.lock().expect("lock").clone()
    }

    fn paginate(&self, products: &[Product], page: &PageRequest) -> ProductPage {
        let size = self.page_size.max(1);
        let start = match page {
            PageRequest::Forward { after, .. } => after
                .as_deref()
                .and_then(|cursor| cursor.parse::<usize>().ok())
                .unwrap_or(0),
            PageRequest::Backward { .. } => 0,
        };
        let end = (start + size).min(products.len());
        let slice = products.get(start..end).unwrap_or_default().to_vec();
        ProductPage::new(
            slice,
            PageInfo {
                has_next_page: end < products.len(),
                has_previous_page: start > 0,
                start_cursor: Some(start.to_string()),
                end_cursor: Some(end.to_string()),
            },
        )
    }

    pub fn stored_cart(&self, cart_id: &str) -> Option<Cart> {
        self.carts.lock().expect("lock").get(cart_id).cloned()
    }

    fn find_variant(&self, merchandise_id: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|product| product.variants.iter().any(|variant| variant.id == merchandise_id))
    }

    fn line_for(&self, merchandise_id: &str, quantity: u32) -> CartLine {
        let product = self.find_variant(merchandise_id);
        let price = product
            .and_then(|product| product.price_range.max_variant_price.value())
            .unwrap_or(0.0);
        CartLine {
            id: format!("line-{merchandise_id}"),
            quantity,
            total_amount: Money::new(format!("{}", price * f64::from(quantity)), "COP"),
            merchandise: CartMerchandise {
                id: merchandise_id.to_string(),
                title: "Default Title".to_string(),
                selected_options: Vec::new(),
                product: CartProduct {
                    id: product.map(|p| p.id.clone()).unwrap_or_default(),
                    handle: product.map(|p| p.handle.clone()).unwrap_or_default(),
                    title: product.map(|p| p.title.clone()).unwrap_or_default(),
                    featured_image: None,
                },
            },
        }
    }

    fn edit_cart(
        &self,
        cart_id: &str,
        edit: impl FnOnce(&mut Vec<CartLine>),
    ) -> RepositoryResult<Cart> {
        let mut carts = self.carts.lock().expect("lock");
        let cart = carts.get_mut(cart_id).ok_or_else(|| ShopifyError::MissingData {
            operation: "cart".to_string(),
        })?;
        edit(&mut cart.lines);
        cart.lines.retain(|line| line.quantity > 0);
        cart.total_quantity = cart.lines.iter().map(|line| line.quantity).sum();
        Ok(cart.clone())
    }
}

impl CatalogReader for FakeRepository {
    async fn list_products(&self, query: &ProductListQuery) -> RepositoryResult<ProductPage> {
        self.check("list_products")?;
        self.product_queries.lock().expect("lock").push(query.clone());
        Ok(self.paginate(&self.products, &query.page))
    }

    async fn list_collection_products(
        &self,
        query: &CollectionProductsQuery,
    ) -> RepositoryResult<ProductPage> {
        self.check("list_collection_products")?;
        self.collection_queries.lock().expect("lock").push(query.clone());
        match self.collections.get(&query.handle) {
            Some(products) => Ok(self.paginate(products, &query.page)),
            None => Ok(ProductPage::empty()),
        }
    }

    async fn get_product(&self, handle: &str) -> RepositoryResult<Option<Product>> {
        self.check("get_product")?;
        Ok(self.products.iter().find(|p| p.handle == handle).cloned())
    }

    async fn product_recommendations(&self, product_id: &str) -> RepositoryResult<Vec<Product>> {
        self.check("product_recommendations")?;
        Ok(self
            .products
            .iter()
            .filter(|p| p.id != product_id)
            .take(4)
            .cloned()
            .collect())
    }

    async fn new_products(&self) -> RepositoryResult<Vec<Product>> {
        self.check("new_products")?;
        Ok(self.products.iter().take(8).cloned().collect())
    }

    async fn predictive_search(&self, term: &str) -> RepositoryResult<Vec<Product>> {
        self.check("predictive_search")?;
        let needle = term.to_lowercase();
        Ok(self
            .products
            .iter()
            .filter(|p| p.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn filter_summary(&self) -> RepositoryResult<FilterFacets> {
        self.check("filter_summary")?;
        Ok(self.filter_summary.clone())
    }
}

impl NavigationReader for FakeRepository {
    async fn menu(&self, _handle: &str) -> RepositoryResult<Vec<MenuItem>> {
        self.check("menu")?;
        Ok(self.menu.clone())
    }

    async fn categories_and_brands(
        &self,
        _menu_handle: &str,
    ) -> RepositoryResult<CategoriesAndBrands> {
        self.check("categories_and_brands")?;
        Ok(self.categories_and_brands.clone())
    }

    async fn subcategories(
        &self,
        _menu_handle: &str,
        _collection_handle: &str,
    ) -> RepositoryResult<Option<SubcategoryGroup>> {
        self.check("subcategories")?;
        Ok(self.subcategories.clone())
    }

    async fn collections(&self) -> RepositoryResult<Vec<Collection>> {
        self.check("collections")?;
        Ok(vec![Collection::all_products()])
    }
}

impl ContentReader for FakeRepository {
    async fn page(&self, handle: &str) -> RepositoryResult<Option<Page>> {
        self.check("page")?;
        Ok(self.pages.iter().find(|page| page.handle == handle).cloned())
    }

    async fn pages(&self) -> RepositoryResult<Vec<Page>> {
        self.check("pages")?;
        Ok(self.pages.clone())
    }

    async fn hero_items(&self, _metaobject_type: &str) -> RepositoryResult<Vec<HeroItem>> {
        self.check("hero_items")?;
        Ok(self.hero_items.clone())
    }

    async fn brand_banner(&self, _metaobject_type: &str) -> RepositoryResult<Vec<HeroItem>> {
        self.check("brand_banner")?;
        Ok(self.hero_items.clone())
    }

    async fn promo_banner(&self, _metaobject_type: &str) -> RepositoryResult<Option<PromoBanner>> {
        self.check("promo_banner")?;
        Ok(self.promo_banner.clone())
    }

    async fn best_product_poster(
        &self,
        _metaobject_type: &str,
    ) -> RepositoryResult<Option<BestProductPoster>> {
        self.check("best_product_poster")?;
        Ok(None)
    }
}

impl CartReader for FakeRepository {
    async fn get_cart(&self, cart_id: &str) -> RepositoryResult<Option<Cart>> {
        self.check("get_cart")?;
        Ok(self.stored_cart(cart_id))
    }
}

impl CartWriter for FakeRepository {
    async fn create_cart(&self) -> RepositoryResult<Cart> {
        self.check("create_cart")?;
        let mut carts = self.carts.lock().expect("lock");
        let id = format!("gid://shopify/Cart/{}", carts.len() + 1);
        let cart = Cart {
            id: id.clone(),
            checkout_url: format!("https://checkout.example/{}", carts.len() + 1),
            cost: CartCost {
                subtotal_amount: Money::zero_usd(),
                total_amount: Money::zero_usd(),
                total_tax_amount: Money::zero_usd(),
            },
            lines: Vec::new(),
            total_quantity: 0,
        };
        carts.insert(id, cart.clone());
        Ok(cart)
    }

    async fn add_to_cart(&self, cart_id: &str, lines: &[CartLineInput]) -> RepositoryResult<Cart> {
        self.check("add_to_cart")?;
        let new_lines: Vec<CartLine> = lines
            .iter()
            .map(|input| self.line_for(&input.merchandise_id, input.quantity))
            .collect();
        self.edit_cart(cart_id, |existing| {
            for line in new_lines {
                match existing.iter_mut().find(|l| l.merchandise.id == line.merchandise.id) {
                    Some(current) => current.quantity += line.quantity,
                    None => existing.push(line),
                }
            }
        })
    }

    async fn update_cart(
        &self,
        cart_id: &str,
        lines: &[CartLineUpdate],
    ) -> RepositoryResult<Cart> {
        self.check("update_cart")?;
        self.edit_cart(cart_id, |existing| {
            for update in lines {
                if let Some(current) = existing.iter_mut().find(|l| l.id == update.id) {
                    current.quantity = update.quantity;
                }
            }
        })
    }

    async fn remove_from_cart(
        &self,
        cart_id: &str,
        line_ids: &[String],
    ) -> RepositoryResult<Cart> {
        self.check("remove_from_cart")?;
        self.edit_cart(cart_id, |existing| {
            existing.retain(|line| !line_ids.contains(&line.id));
        })
    }
}
