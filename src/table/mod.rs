pub mod filter;
pub mod pagination;
pub mod quick_filter;
pub mod renderer;
pub mod sort;

pub use filter::FilterModel;
pub use pagination::Pagination;
pub use quick_filter::{find_preset, matching_preset, presets_for, QuickPreset};
pub use renderer::{
    ActionProvider, RenderedRow, RowAction, TableOutput, TableRenderer, EMPTY_MESSAGE, LOADING_MESSAGE,
};
pub use sort::{compare_values, sort_rows, SortModel};
