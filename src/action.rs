use crate::error::FetchError;
use crate::query::ListKey;
use crate::types::Product;

#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    ScrollUp,
    ScrollDown,

    // Pagination
    NextPage,
    PrevPage,
    GoToPage(u32),

    // Selection
    Select,
    CloseOverlay,
    NextImage,
    PrevImage,

    // Fetch results, tagged with the key they were issued for
    ProductsLoaded {
        key: ListKey,
        result: Result<Vec<Product>, FetchError>,
    },
    ProductLoaded {
        id: String,
        result: Result<Box<Product>, FetchError>,
    },
    Retry,

    // Sharing
    YankLink,
    OpenLink,

    None,
}
