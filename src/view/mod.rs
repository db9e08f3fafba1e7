pub mod table_view;

pub use table_view::{
    render_screen, ConsoleView, NotificationView, ScreenRow, TableBody, TableScreen, TableView,
};
