//! Page and selection state, kept in lockstep with the location.
//!
//! Every transition updates the in-memory state and pushes the matching
//! location in the same call, so the two can never be observed apart.

use crate::config::CatalogConfig;
use crate::location::{Location, UrlState, PAGE_PARAM, PRODUCT_PARAM};
use crate::query::ListKey;
use crate::types::Product;

#[derive(Debug, Clone)]
pub struct PageSelectionController {
    catalog: CatalogConfig,
    location: Location,
    history: Vec<String>,
    current_page: u32,
    selected_product_id: Option<String>,
    overlay_open: bool,
}

impl PageSelectionController {
    /// Initial state from a (possibly deep-linked) location. A `productId`
    /// opens the overlay straight away.
    pub fn from_location(catalog: CatalogConfig, location: Location) -> Self {
        let state = UrlState::deserialize(&location);
        let overlay_open = state.product_id.is_some();

        tracing::info!(
            page = state.page,
            product_id = ?state.product_id,
            "initialized from {}",
            location
        );

        Self {
            catalog,
            history: vec![location.to_query_string()],
            location,
            current_page: state.page,
            selected_product_id: state.product_id,
            overlay_open,
        }
    }

    /// Show page `page`. No upper bound is enforced; any selection in the
    /// location is carried over.
    pub fn go_to_page(&mut self, page: u32) {
        let page = page.max(1);
        self.current_page = page;
        self.location.set(PAGE_PARAM, page.to_string());
        self.push();
        tracing::info!(page, "go to page");
    }

    pub fn select_product(&mut self, product: &Product) {
        let id = product.id.to_string();
        self.overlay_open = true;
        self.location.set(PRODUCT_PARAM, id.clone());
        self.selected_product_id = Some(id);
        self.push();
        tracing::info!(product_id = product.id, "select product");
    }

    /// Hide the overlay and drop `productId` from the location. The last
    /// selected id stays in memory and keeps keying the detail query.
    pub fn close_overlay(&mut self) {
        self.overlay_open = false;
        self.location.remove(PRODUCT_PARAM);
        self.push();
        tracing::info!("close overlay");
    }

    /// Back to defaults, as when the view is left.
    pub fn reset(&mut self) {
        self.location = Location::default();
        self.history.clear();
        self.current_page = 1;
        self.selected_product_id = None;
        self.overlay_open = false;
    }

    fn push(&mut self) {
        self.history.push(self.location.to_query_string());
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn selected_product_id(&self) -> Option<&str> {
        self.selected_product_id.as_deref()
    }

    pub fn is_overlay_open(&self) -> bool {
        self.overlay_open
    }

    pub fn total_pages(&self) -> u32 {
        self.catalog.total_pages()
    }

    pub fn list_key(&self) -> ListKey {
        ListKey::new(self.current_page, self.catalog.items_per_page)
    }

    pub fn detail_key(&self) -> Option<String> {
        self.selected_product_id.clone()
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Query strings pushed so far, oldest first
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn share_link(&self, base: &str) -> String {
        format!("{}{}", base, self.location.to_query_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::sample_product;

    fn catalog() -> CatalogConfig {
        CatalogConfig {
            items_per_page: 6,
            total_items: 15,
        }
    }

    fn from(query: &str) -> PageSelectionController {
        PageSelectionController::from_location(catalog(), Location::parse(query))
    }

    #[test]
    fn defaults_without_params() {
        let ctl = from("");
        assert_eq!(ctl.current_page(), 1);
        assert_eq!(ctl.selected_product_id(), None);
        assert!(!ctl.is_overlay_open());
        assert_eq!(ctl.detail_key(), None);
    }

    #[test]
    fn deep_link_opens_overlay() {
        let ctl = from("?productId=42");
        assert_eq!(ctl.current_page(), 1);
        assert!(ctl.is_overlay_open());
        assert_eq!(ctl.detail_key().as_deref(), Some("42"));
    }

    #[test]
    fn go_to_page_sets_page_and_keeps_selection() {
        for n in [1, 2, 3, 17, 1000] {
            let mut ctl = from("?productId=9");
            ctl.go_to_page(n);
            let state = UrlState::deserialize(ctl.location());
            assert_eq!(state.page, n);
            assert_eq!(state.product_id.as_deref(), Some("9"));
            assert_eq!(ctl.current_page(), n);
        }
    }

    #[test]
    fn go_to_page_only_changes_list_key() {
        let mut ctl = from("?page=1&productId=3");
        let detail = ctl.detail_key();
        ctl.go_to_page(2);
        assert_eq!(ctl.list_key(), ListKey::new(2, 6));
        assert_eq!(ctl.detail_key(), detail);
    }

    #[test]
    fn go_to_page_beyond_total_is_accepted() {
        let mut ctl = from("");
        assert_eq!(ctl.total_pages(), 3);
        ctl.go_to_page(4);
        assert_eq!(ctl.current_page(), 4);
        assert_eq!(ctl.list_key().offset(), 18);
    }

    #[test]
    fn go_to_page_zero_stays_positive() {
        let mut ctl = from("?page=3");
        ctl.go_to_page(0);
        assert_eq!(ctl.current_page(), 1);
        assert_eq!(ctl.location().get("page"), Some("1"));
    }

    #[test]
    fn select_then_close() {
        let mut ctl = from("?page=2");
        ctl.select_product(&sample_product(7, "Lamp"));
        assert!(ctl.is_overlay_open());
        assert_eq!(ctl.location().to_query_string(), "?page=2&productId=7");

        ctl.close_overlay();
        assert!(!ctl.is_overlay_open());
        assert_eq!(ctl.location().to_query_string(), "?page=2");
        assert_eq!(ctl.current_page(), 2);
        // Hidden, not unmounted: the detail key is left alone.
        assert_eq!(ctl.detail_key().as_deref(), Some("7"));
    }

    #[test]
    fn select_leaves_missing_page_untouched() {
        let mut ctl = from("");
        ctl.select_product(&sample_product(5, "Chair"));
        assert_eq!(ctl.location().to_query_string(), "?productId=5");
    }

    #[test]
    fn close_with_only_selection_empties_query() {
        let mut ctl = from("?productId=42");
        ctl.close_overlay();
        assert_eq!(ctl.location().to_query_string(), "");
        assert_eq!(ctl.share_link("/products"), "/products");
    }

    #[test]
    fn closed_selection_is_not_restored_by_paging() {
        let mut ctl = from("?productId=42");
        ctl.close_overlay();
        ctl.go_to_page(2);
        assert_eq!(ctl.location().to_query_string(), "?page=2");
    }

    #[test]
    fn every_transition_pushes_one_entry() {
        let mut ctl = from("?page=1");
        ctl.go_to_page(2);
        ctl.select_product(&sample_product(3, "Desk"));
        ctl.close_overlay();
        assert_eq!(
            ctl.history(),
            ["?page=1", "?page=2", "?page=2&productId=3", "?page=2"]
        );
    }

    #[test]
    fn repeated_actions_are_safe() {
        let mut ctl = from("?page=2");
        ctl.go_to_page(2);
        ctl.go_to_page(2);
        let product = sample_product(8, "Vase");
        ctl.select_product(&product);
        ctl.select_product(&product);
        assert_eq!(ctl.list_key(), ListKey::new(2, 6));
        assert_eq!(ctl.detail_key().as_deref(), Some("8"));
        assert_eq!(ctl.location().to_query_string(), "?page=2&productId=8");
    }

    #[test]
    fn unknown_params_survive_transitions() {
        let mut ctl = from("?ref=newsletter&page=1");
        ctl.go_to_page(3);
        ctl.select_product(&sample_product(1, "Pen"));
        ctl.close_overlay();
        assert_eq!(ctl.location().to_query_string(), "?ref=newsletter&page=3");
    }

    #[test]
    fn share_link_appends_query() {
        let mut ctl = from("");
        ctl.go_to_page(2);
        assert_eq!(
            ctl.share_link("https://shop.example/products"),
            "https://shop.example/products?page=2"
        );
    }

    #[test]
    fn reset_restores_defaults() {
        let mut ctl = from("?page=3&productId=4");
        ctl.reset();
        assert_eq!(ctl.current_page(), 1);
        assert_eq!(ctl.detail_key(), None);
        assert!(!ctl.is_overlay_open());
        assert!(ctl.location().is_empty());
        assert!(ctl.history().is_empty());
    }
}
