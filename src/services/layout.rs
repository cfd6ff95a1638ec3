use crate::domain::menu::MenuItem;
use crate::repository::{CartReader, NavigationReader};

/// Data shared by every page: navigation and the cart badge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutData {
    pub menu: Vec<MenuItem>,
    pub cart_quantity: u32,
    /// Whether the session's cart id no longer resolves to a cart.
    pub stale_cart: bool,
}

/// Loads the layout. Failures only cost the affected element.
pub async fn load_layout<R>(repo: &R, menu_handle: &str, cart_id: Option<&str>) -> LayoutData
where
    R: NavigationReader + CartReader + ?Sized,
{
    let menu = match repo.menu(menu_handle).await {
        Ok(menu) => menu,
        Err(err) => {
            log::warn!("Failed to load menu {menu_handle}: {err}");
            Vec::new()
        }
    };

    let (cart_quantity, stale_cart) = match cart_id {
        None => (0, false),
        Some(cart_id) => match repo.get_cart(cart_id).await {
            Ok(Some(cart)) => (cart.total_quantity, false),
            Ok(None) => (0, true),
            Err(err) => {
                log::warn!("Failed to load cart {cart_id}: {err}");
                (0, false)
            }
        },
    };

    LayoutData {
        menu,
        cart_quantity,
        stale_cart,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::CartWriter;
    use crate::repository::fake::FakeRepository;

    #[actix_web::test]
    async fn menu_failure_keeps_the_cart_badge() {
        let mut repo = FakeRepository::with_products(Vec::new());
        repo.menu = vec![MenuItem {
            title: "Inicio".into(),
            path: "/".into(),
            children: Vec::new(),
        }];
        let cart = repo.create_cart().await.expect("cart");
        repo.fail("menu");

        let layout = load_layout(&repo, "main-menu", Some(&cart.id)).await;

        assert!(layout.menu.is_empty());
        assert_eq!(layout.cart_quantity, 0);
        assert!(!layout.stale_cart);
    }

    #[actix_web::test]
    async fn vanished_carts_are_flagged() {
        let repo = FakeRepository::with_products(Vec::new());

        let layout = load_layout(&repo, "main-menu", Some("gid://shopify/Cart/gone")).await;

        assert!(layout.stale_cart);
    }
}
