use crate::domain::brand::BrandProfile;
use crate::domain::content::{BestProductPoster, HeroItem, Page, PromoBanner};
use crate::domain::menu::MenuLink;
use crate::domain::product::Product;
use crate::repository::{CatalogReader, ContentReader, NavigationReader, RepositoryResult};
use crate::services::{ServiceError, ServiceResult};

/// Sections of the home page. Every section is optional.
#[derive(Debug, Clone, Default)]
pub struct HomePageData {
    pub hero_items: Vec<HeroItem>,
    pub promo_banner: Option<PromoBanner>,
    pub new_products: Vec<Product>,
    pub best_product: Option<BestProductPoster>,
    pub categories: Vec<MenuLink>,
    pub brands: Vec<MenuLink>,
    /// Brand banner of stores that carry one.
    pub brand_banner: Vec<HeroItem>,
}

/// Content of a failed section is replaced with its default.
fn section<T: Default>(result: RepositoryResult<T>, name: &str) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            log::warn!("Failed to load home section {name}: {err}");
            T::default()
        }
    }
}

/// Loads every home page section for the configured brand.
pub async fn load_home_page<R>(repo: &R, profile: &BrandProfile, menu_handle: &str) -> HomePageData
where
    R: CatalogReader + NavigationReader + ContentReader + ?Sized,
{
    let hero_items = section(repo.hero_items(profile.hero_type).await, "hero");
    let promo_banner = section(repo.promo_banner(profile.promo_banner_type).await, "promo");
    let new_products = section(repo.new_products().await, "new products");
    let best_product = section(
        repo.best_product_poster(profile.best_product_type).await,
        "best product",
    );
    let strips = section(repo.categories_and_brands(menu_handle).await, "menu strips");
    let brand_banner = match profile.brand_banner_type {
        Some(banner_type) => section(repo.brand_banner(banner_type).await, "brand banner"),
        None => Vec::new(),
    };

    HomePageData {
        hero_items,
        promo_banner,
        new_products,
        best_product,
        categories: strips.categories,
        brands: strips.brands,
        brand_banner,
    }
}

/// Loads a CMS page by handle.
pub async fn load_page<R>(repo: &R, handle: &str) -> ServiceResult<Page>
where
    R: ContentReader + ?Sized,
{
    repo.page(handle).await?.ok_or(ServiceError::NotFound)
}

/// CMS pages linked from the about page.
pub async fn load_about_links<R>(repo: &R) -> Vec<Page>
where
    R: ContentReader + ?Sized,
{
    section(repo.pages().await, "pages")
}
