use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::action::Action;
use crate::catalog::Catalog;
use crate::controller::PageSelectionController;
use crate::error::{Result, ShelfError};
use crate::event::Event;
use crate::query::{KeyedQuery, ListKey};
use crate::types::Product;

pub struct App {
    pub controller: PageSelectionController,

    // Two independent fetches: the page grid and the selected product
    pub products: KeyedQuery<ListKey, Vec<Product>>,
    pub product: KeyedQuery<String, Product>,

    pub list_index: usize,
    pub image_index: usize,
    pub notice: Option<String>,
    pub error: Option<String>,
    pub should_quit: bool,
    share_base: String,
    catalog: Arc<dyn Catalog>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl App {
    pub fn new(
        controller: PageSelectionController,
        catalog: Arc<dyn Catalog>,
        share_base: String,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            controller,
            products: KeyedQuery::new(),
            product: KeyedQuery::new(),
            list_index: 0,
            image_index: 0,
            notice: None,
            error: None,
            should_quit: false,
            share_base,
            catalog,
            action_tx,
        }
    }

    /// Issue the fetches for the initial state.
    pub fn mount(&mut self) {
        self.sync_fetches();
    }

    /// Leave the view: state goes back to defaults and pending results are
    /// ignored from here on.
    pub fn unmount(&mut self) {
        tracing::debug!(
            "leaving after {} location changes",
            self.controller.history().len().saturating_sub(1)
        );
        self.controller.reset();
        self.products = KeyedQuery::new();
        self.product = KeyedQuery::new();
        self.list_index = 0;
        self.image_index = 0;
    }

    pub fn share_link(&self) -> String {
        self.controller.share_link(&self.share_base)
    }

    pub fn handle_event(&self, event: Event) -> Action {
        match event {
            Event::Key(key) => self.handle_key(key),
            _ => Action::None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Action {
        if self.controller.is_overlay_open() {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => Action::CloseOverlay,
                KeyCode::Char('h') | KeyCode::Left => Action::PrevImage,
                KeyCode::Char('l') | KeyCode::Right => Action::NextImage,
                KeyCode::Char('r') => Action::Retry,
                KeyCode::Char('y') => Action::YankLink,
                KeyCode::Char('o') => Action::OpenLink,
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::Enter => Action::Select,
            KeyCode::Char('n') | KeyCode::Char('l') | KeyCode::Right => Action::NextPage,
            KeyCode::Char('p') | KeyCode::Char('h') | KeyCode::Left => Action::PrevPage,
            KeyCode::Char('g') => Action::GoToPage(1),
            KeyCode::Char(c @ '1'..='9') => Action::GoToPage(c as u32 - '0' as u32),
            KeyCode::Char('r') => Action::Retry,
            KeyCode::Char('y') => Action::YankLink,
            KeyCode::Char('o') => Action::OpenLink,
            _ => Action::None,
        }
    }

    pub fn update(&mut self, action: Action) {
        if !matches!(
            action,
            Action::ProductsLoaded { .. } | Action::ProductLoaded { .. } | Action::None
        ) {
            self.notice = None;
            self.error = None;
        }

        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::ScrollUp => {
                self.list_index = self.list_index.saturating_sub(1);
            }
            Action::ScrollDown => {
                let len = self.products.data().map_or(0, Vec::len);
                if len > 0 && self.list_index < len - 1 {
                    self.list_index += 1;
                }
            }

            Action::NextPage => {
                let page = self.controller.current_page();
                if page < self.controller.total_pages() {
                    self.change_page(page + 1);
                }
            }
            Action::PrevPage => {
                let page = self.controller.current_page();
                if page > 1 {
                    self.change_page(page - 1);
                }
            }
            Action::GoToPage(page) => {
                self.change_page(page);
            }

            Action::Select => {
                let selected = self
                    .products
                    .data()
                    .and_then(|products| products.get(self.list_index))
                    .cloned();
                if let Some(product) = selected {
                    let id = product.id.to_string();
                    if self.controller.selected_product_id() != Some(id.as_str()) {
                        self.image_index = 0;
                    }
                    self.controller.select_product(&product);
                }
            }
            Action::CloseOverlay => {
                self.controller.close_overlay();
            }
            Action::NextImage => {
                let count = self.image_count();
                if count > 0 {
                    self.image_index = (self.image_index + 1) % count;
                }
            }
            Action::PrevImage => {
                let count = self.image_count();
                if count > 0 {
                    self.image_index = (self.image_index + count - 1) % count;
                }
            }

            Action::ProductsLoaded { key, result } => {
                if self.products.resolve(key, result) {
                    let len = self.products.data().map_or(0, Vec::len);
                    self.list_index = self.list_index.min(len.saturating_sub(1));
                }
            }
            Action::ProductLoaded { id, result } => {
                self.product.resolve(id, result.map(|product| *product));
            }
            Action::Retry => {
                if self.controller.is_overlay_open() && self.product.error().is_some() {
                    if let Some(id) = self.product.retry() {
                        self.spawn_load_product(id);
                    }
                } else if self.products.error().is_some() {
                    if let Some(key) = self.products.retry() {
                        self.spawn_load_products(key);
                    }
                }
            }

            Action::YankLink => match self.copy_link() {
                Ok(()) => self.notice = Some("Copied link to clipboard".to_string()),
                Err(e) => self.error = Some(e.to_string()),
            },
            Action::OpenLink => {
                let link = self.share_link();
                match open::that(&link) {
                    Ok(()) => self.notice = Some(format!("Opened {}", link)),
                    Err(e) => self.error = Some(ShelfError::Browser(e.to_string()).to_string()),
                }
            }

            Action::None => {}
        }

        self.sync_fetches();
    }

    fn change_page(&mut self, page: u32) {
        self.controller.go_to_page(page);
        self.list_index = 0;
    }

    fn image_count(&self) -> usize {
        self.product.data().map_or(0, |p| p.images.len())
    }

    fn copy_link(&self) -> Result<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ShelfError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(self.share_link())
            .map_err(|e| ShelfError::Clipboard(e.to_string()))
    }

    /// Re-key both queries from the controller and issue whatever changed.
    fn sync_fetches(&mut self) {
        if let Some(key) = self.products.set_key(Some(self.controller.list_key())) {
            self.spawn_load_products(key);
        }
        if let Some(id) = self.product.set_key(self.controller.detail_key()) {
            self.spawn_load_product(id);
        }
    }

    fn spawn_load_products(&self, key: ListKey) {
        tracing::debug!(page = key.page, offset = key.offset(), "fetching products");
        let tx = self.action_tx.clone();
        let catalog = Arc::clone(&self.catalog);
        tokio::spawn(async move {
            let result = catalog.list_products(key.offset(), key.limit).await;
            tx.send(Action::ProductsLoaded { key, result }).ok();
        });
    }

    fn spawn_load_product(&self, id: String) {
        tracing::debug!(product_id = %id, "fetching product");
        let tx = self.action_tx.clone();
        let catalog = Arc::clone(&self.catalog);
        tokio::spawn(async move {
            let result = catalog.get_product(&id).await.map(Box::new);
            tx.send(Action::ProductLoaded { id, result }).ok();
        });
    }
}
