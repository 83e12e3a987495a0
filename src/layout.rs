//! Element queries describing where each harvested field lives in the shop's markup

use crate::crawler::ElementQuery;

/// Where to find every link and field on the shop's pages
///
/// The defaults describe the demo shop. Both engines take a layout so a
/// differently marked-up shop only needs a different value, not new code.
#[derive(Debug, Clone)]
pub struct SiteLayout {
    /// Navigation menu on the start page
    pub nav_menu: ElementQuery,
    /// Pagination control on a category root page
    pub pagination: ElementQuery,
    /// "Buy" element wrapping each product card link on a listing page
    pub purchase: ElementQuery,
    /// Link element inside the three containers above
    pub link: ElementQuery,
    /// One `label: value` entry inside a description container
    pub description_entry: ElementQuery,

    /// Product card fields
    pub product_name: ElementQuery,
    pub product_article: ElementQuery,
    pub product_description: ElementQuery,
    pub product_stock: ElementQuery,
    pub product_price: ElementQuery,
    pub product_old_price: ElementQuery,

    /// One product summary on a listing page; the listing fields are looked up inside it
    pub listing_item: ElementQuery,
    pub listing_name: ElementQuery,
    pub listing_description: ElementQuery,
    pub listing_price: ElementQuery,
}

impl Default for SiteLayout {
    fn default() -> Self {
        Self {
            nav_menu: ElementQuery::new("div").class("nav_menu"),
            pagination: ElementQuery::new("div").class("pagen"),
            purchase: ElementQuery::new("div").class("sale_button"),
            link: ElementQuery::new("a"),
            description_entry: ElementQuery::new("li"),

            product_name: ElementQuery::new("p").id("p_header"),
            product_article: ElementQuery::new("p").class("article"),
            product_description: ElementQuery::new("ul").id("description"),
            product_stock: ElementQuery::new("span").id("in_stock"),
            product_price: ElementQuery::new("span").id("price"),
            product_old_price: ElementQuery::new("span").id("old_price"),

            listing_item: ElementQuery::new("div").class("item"),
            listing_name: ElementQuery::new("a").class("name_item"),
            listing_description: ElementQuery::new("div").class("description"),
            listing_price: ElementQuery::new("p").class("price"),
        }
    }
}
