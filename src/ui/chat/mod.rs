//! Chat widget components.
//!
//! The launcher and modal make up the widget root; the modal hosts the chat
//! panel (header, message list, composer). Every interactive element talks to
//! the `/widget/{id}/...` routes through HTMX and swaps server-rendered HTML.

mod header;
mod input_area;
mod launcher;
mod message_list;
mod modal;
mod panel;

pub use header::ChatHeader;
pub use input_area::ChatInputArea;
pub use launcher::ChatLauncher;
pub use message_list::ChatMessageList;
pub use modal::ChatModal;
pub use panel::ChatPanel;
