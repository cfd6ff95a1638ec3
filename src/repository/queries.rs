//! GraphQL documents sent to the Storefront API.

macro_rules! image_fragment {
    () => {
        r#"
fragment image on Image {
  url
  altText
  width
  height
}
"#
    };
}

macro_rules! seo_fragment {
    () => {
        r#"
fragment seo on SEO {
  description
  title
}
"#
    };
}

macro_rules! product_fragment {
    () => {
        concat!(
            r#"
fragment product on Product {
  id
  handle
  availableForSale
  title
  description
  descriptionHtml
  vendor
  productType
  options { id name values }
  priceRange {
    maxVariantPrice { amount currencyCode }
    minVariantPrice { amount currencyCode }
  }
  variants(first: 250) {
    edges {
      node {
        id
        title
        availableForSale
        quantityAvailable
        selectedOptions { name value }
        price { amount currencyCode }
      }
    }
  }
  featuredImage { ...image }
  images(first: 20) { edges { node { ...image } } }
  collections(first: 10) { edges { node { id handle title } } }
  seo { ...seo }
  tags
  updatedAt
}
"#,
            image_fragment!(),
            seo_fragment!()
        )
    };
}

macro_rules! cart_fragment {
    () => {
        concat!(
            r#"
fragment cart on Cart {
  id
  checkoutUrl
  cost {
    subtotalAmount { amount currencyCode }
    totalAmount { amount currencyCode }
    totalTaxAmount { amount currencyCode }
  }
  lines(first: 100) {
    edges {
      node {
        id
        quantity
        cost { totalAmount { amount currencyCode } }
        merchandise {
          ... on ProductVariant {
            id
            title
            selectedOptions { name value }
            product { id handle title featuredImage { ...image } }
          }
        }
      }
    }
  }
  totalQuantity
}
"#,
            image_fragment!()
        )
    };
}

macro_rules! page_fragment {
    () => {
        concat!(
            r#"
fragment page on Page {
  ... on Page {
    id
    title
    handle
    body
    bodySummary
    seo { ...seo }
    createdAt
    updatedAt
  }
}
"#,
            seo_fragment!()
        )
    };
}

macro_rules! page_info {
    () => {
        "pageInfo { hasNextPage hasPreviousPage startCursor endCursor }"
    };
}

pub const PRODUCTS_QUERY: &str = concat!(
    r#"
query getProducts($query: String, $sortKey: ProductSortKeys, $reverse: Boolean,
                  $first: Int, $after: String, $last: Int, $before: String) {
  products(query: $query, sortKey: $sortKey, reverse: $reverse,
           first: $first, after: $after, last: $last, before: $before) {
    edges { node { ...product } }
    "#,
    page_info!(),
    r#"
  }
}
"#,
    product_fragment!()
);

pub const COLLECTION_PRODUCTS_QUERY: &str = concat!(
    r#"
query getCollectionProducts($handle: String!, $sortKey: ProductCollectionSortKeys,
                            $reverse: Boolean, $first: Int, $after: String,
                            $last: Int, $before: String) {
  collection(handle: $handle) {
    products(sortKey: $sortKey, reverse: $reverse, first: $first, after: $after,
             last: $last, before: $before) {
      edges { node { ...product } }
      "#,
    page_info!(),
    r#"
    }
  }
}
"#,
    product_fragment!()
);

pub const PRODUCT_QUERY: &str = concat!(
    r#"
query getProduct($handle: String!) {
  product(handle: $handle) { ...product }
}
"#,
    product_fragment!()
);

pub const PRODUCT_RECOMMENDATIONS_QUERY: &str = concat!(
    r#"
query getProductRecommendations($productId: ID!) {
  productRecommendations(productId: $productId) { ...product }
}
"#,
    product_fragment!()
);

pub const NEW_PRODUCTS_QUERY: &str = concat!(
    r#"
query getNewProducts {
  products(first: 8, sortKey: CREATED_AT, reverse: true) {
    edges { node { ...product } }
  }
}
"#,
    product_fragment!()
);

pub const FILTER_SUMMARY_QUERY: &str = r#"
query getInitialFilterData {
  productTypes(first: 250) { edges { node } }
  productTags(first: 250) { edges { node } }
  products(first: 250, sortKey: PRICE, reverse: false) {
    edges {
      node {
        vendor
        priceRange {
          minVariantPrice { amount }
          maxVariantPrice { amount }
        }
      }
    }
  }
}
"#;

pub const COLLECTIONS_QUERY: &str = concat!(
    r#"
query getCollections {
  collections(first: 100, sortKey: TITLE) {
    edges {
      node {
        handle
        title
        description
        seo { ...seo }
        updatedAt
      }
    }
  }
}
"#,
    seo_fragment!()
);

pub const MENU_QUERY: &str = r#"
query getMenu($handle: String!) {
  menu(handle: $handle) {
    items {
      id
      title
      url
      resource { ... on Collection { handle image { url altText } } }
      items {
        id
        title
        url
        resource { ... on Collection { handle image { url altText } } }
        items {
          id
          title
          url
          resource { ... on Collection { handle image { url altText } } }
        }
      }
    }
  }
}
"#;

pub const CREATE_CART_MUTATION: &str = concat!(
    r#"
mutation createCart($lineItems: [CartLineInput!]) {
  cartCreate(input: { lines: $lineItems }) {
    cart { ...cart }
  }
}
"#,
    cart_fragment!()
);

pub const CART_QUERY: &str = concat!(
    r#"
query getCart($cartId: ID!) {
  cart(id: $cartId) { ...cart }
}
"#,
    cart_fragment!()
);

pub const ADD_TO_CART_MUTATION: &str = concat!(
    r#"
mutation addToCart($cartId: ID!, $lines: [CartLineInput!]!) {
  cartLinesAdd(cartId: $cartId, lines: $lines) {
    cart { ...cart }
  }
}
"#,
    cart_fragment!()
);

pub const UPDATE_CART_MUTATION: &str = concat!(
    r#"
mutation editCartItems($cartId: ID!, $lines: [CartLineUpdateInput!]!) {
  cartLinesUpdate(cartId: $cartId, lines: $lines) {
    cart { ...cart }
  }
}
"#,
    cart_fragment!()
);

pub const REMOVE_FROM_CART_MUTATION: &str = concat!(
    r#"
mutation removeFromCart($cartId: ID!, $lineIds: [ID!]!) {
  cartLinesRemove(cartId: $cartId, lineIds: $lineIds) {
    cart { ...cart }
  }
}
"#,
    cart_fragment!()
);

pub const PAGE_QUERY: &str = concat!(
    r#"
query getPage($handle: String!) {
  pageByHandle(handle: $handle) { ...page }
}
"#,
    page_fragment!()
);

pub const PAGES_QUERY: &str = concat!(
    r#"
query getPages {
  pages(first: 100) {
    edges { node { ...page } }
  }
}
"#,
    page_fragment!()
);

/// Metaobjects of `$type` whose fields reference images and products.
pub const METAOBJECTS_QUERY: &str = r#"
query getMetaobjects($type: String!, $first: Int!, $reverse: Boolean) {
  metaobjects(type: $type, first: $first, reverse: $reverse) {
    edges {
      node {
        id
        handle
        fields {
          key
          value
          reference {
            ... on MediaImage { image { url altText width height } }
            ... on Product {
              handle
              title
              tags
              featuredImage { url altText width height }
              images(first: 10) { edges { node { url altText width height } } }
            }
          }
        }
      }
    }
  }
}
"#;

/// Name of the operation in `document`, used to label errors.
pub fn operation_name(document: &str) -> &str {
    document
        .split_whitespace()
        .skip_while(|word| *word != "query" && *word != "mutation")
        .nth(1)
        .map(|name| name.split(['(', '{']).next().unwrap_or(name))
        .unwrap_or("anonymous")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_names_are_extracted() {
        assert_eq!(operation_name(PRODUCTS_QUERY), "getProducts");
        assert_eq!(operation_name(ADD_TO_CART_MUTATION), "addToCart");
        assert_eq!(operation_name(NEW_PRODUCTS_QUERY), "getNewProducts");
        assert_eq!(operation_name("{ shop { name } }"), "anonymous");
    }

    #[test]
    fn documents_carry_their_fragments() {
        assert!(PRODUCT_QUERY.contains("fragment product on Product"));
        assert!(PRODUCT_QUERY.contains("fragment image on Image"));
        assert!(CART_QUERY.contains("fragment cart on Cart"));
        assert!(PAGE_QUERY.contains("fragment seo on SEO"));
    }
}
