pub mod block_quote;
pub mod heading;
pub mod list_item;
pub mod thematic_break;

pub use block_quote::BlockQuote;
pub use heading::Heading;
pub use list_item::ListItem;
pub use thematic_break::ThematicBreak;
