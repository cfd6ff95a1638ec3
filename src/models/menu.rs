use serde::Deserialize;

use crate::domain::menu::{
    BRANDS_HEADING, CATEGORY_HEADINGS, CategoriesAndBrands, MenuItem as DomainMenuItem, MenuLink,
    Subcategory, SubcategoryGroup, is_group_heading, storefront_path,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Menu {
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceImage {
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
}

/// Object a menu entry points at; only collections carry these fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuResource {
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub image: Option<ResourceImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MenuItem {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
    #[serde(default)]
    pub resource: Option<MenuResource>,
}

impl MenuItem {
    fn path(&self, store_domain: &str) -> String {
        storefront_path(&self.url, store_domain)
    }

    fn image(&self) -> Option<&ResourceImage> {
        self.resource.as_ref().and_then(|resource| resource.image.as_ref())
    }

    fn into_navigation(self, store_domain: &str) -> DomainMenuItem {
        DomainMenuItem {
            path: self.path(store_domain),
            children: self
                .items
                .into_iter()
                .map(|child| child.into_navigation(store_domain))
                .collect(),
            title: self.title,
        }
    }

    fn to_link(&self, store_domain: &str) -> MenuLink {
        MenuLink {
            id: self.id.clone(),
            title: self.title.clone(),
            path: self.path(store_domain),
            image: self.image().map(|image| image.url.clone()),
            alt_text: self.image().and_then(|image| image.alt_text.clone()),
        }
    }

    fn to_subcategory(&self, store_domain: &str) -> Subcategory {
        Subcategory {
            id: self.id.clone(),
            title: self.title.clone(),
            path: self.path(store_domain),
            image: self.image().map(|image| image.url.clone()),
            children: self
                .items
                .iter()
                .map(|child| child.to_subcategory(store_domain))
                .collect(),
        }
    }
}

/// Top-level navigation with storefront paths; group headings link to `#`.
pub fn into_navigation(menu: Menu, store_domain: &str) -> Vec<DomainMenuItem> {
    menu.items
        .into_iter()
        .map(|item| {
            let mut entry = item.into_navigation(store_domain);
            if is_group_heading(&entry.title) {
                entry.path = "#".to_string();
            }
            entry
        })
        .collect()
}

/// Category and brand strips built from the children of their headings.
pub fn categories_and_brands(menu: &Menu, store_domain: &str) -> CategoriesAndBrands {
    let categories = CATEGORY_HEADINGS
        .iter()
        .map(|heading| heading_links(menu, heading, store_domain))
        .find(|links| !links.is_empty())
        .unwrap_or_default();

    CategoriesAndBrands {
        categories,
        brands: heading_links(menu, BRANDS_HEADING, store_domain),
    }
}

/// Subcategories of the category whose collection handle is `handle`.
pub fn subcategories(menu: &Menu, handle: &str, store_domain: &str) -> Option<SubcategoryGroup> {
    let categories = menu
        .items
        .iter()
        .find(|item| item.title == CATEGORY_HEADINGS[0])?;

    let target = categories.items.iter().find(|item| {
        item.resource
            .as_ref()
            .and_then(|resource| resource.handle.as_deref())
            == Some(handle)
    })?;

    Some(SubcategoryGroup {
        id: target.id.clone(),
        title: target.title.clone(),
        children: target
            .items
            .iter()
            .map(|child| child.to_subcategory(store_domain))
            .collect(),
    })
}

fn heading_links(menu: &Menu, heading: &str, store_domain: &str) -> Vec<MenuLink> {
    menu.items
        .iter()
        .find(|item| item.title == heading)
        .map(|item| {
            item.items
                .iter()
                .map(|child| child.to_link(store_domain))
                .filter(|link| !link.path.contains("/frontpage"))
                .collect()
        })
        .unwrap_or_default()
}


#[cfg(test)]
mod tests {
    use super::fixtures::{STORE, main_menu};
    use super::*;

    fn menu() -> Menu {
        serde_json::from_value(main_menu()).expect("menu")
    }

    #[test]
    fn navigation_paths_are_normalised() {
        let navigation = into_navigation(menu(), STORE);

        let paths: Vec<&str> = navigation.iter().map(|item| item.path.as_str()).collect();
        assert_eq!(paths, vec!["/search", "#", "#", "/about-us"]);
        assert_eq!(navigation[1].children[0].path, "/collection/dj");
    }

    #[test]
    fn strips_exclude_the_frontpage() {
        let strips = categories_and_brands(&menu(), STORE);

        assert_eq!(strips.categories.len(), 1);
        assert_eq!(strips.categories[0].image.as_deref(), Some("https://cdn/dj.png"));
        assert_eq!(strips.brands[0].path, "/collection/jbl");
    }

    #[test]
    fn subcategories_follow_the_collection_handle() {
        let group = subcategories(&menu(), "dj", STORE).expect("group");

        assert_eq!(group.title, "DJ");
        assert_eq!(group.children[0].path, "/collection/controladoras");
        assert!(subcategories(&menu(), "missing", STORE).is_none());
    }
}
