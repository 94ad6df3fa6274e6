//! Presentation shell.
//!
//! Leptos SSR components that render widget state to HTML fragments. Nothing
//! here holds state: every fragment is a pure function of a
//! [`view_model`] snapshot.
//!
//! # Structure
//!
//! - [`components`]: Reusable ShadCN-style building blocks
//! - [`chat`]: Launcher, modal and chat panel
//! - [`view_model`]: Snapshots handed to the components

pub mod chat;
pub mod components;
pub mod view_model;

use leptos::prelude::*;
use leptos::tachys::view::RenderHtml;

use crate::config::WidgetConfig;
use chat::{ChatLauncher, ChatModal, ChatPanel};
use view_model::{PanelView, WidgetView};

/// Route the injected placeholder loads the widget from.
pub const MOUNT_PATH: &str = "/widget/mount";

/// Route serving [`STYLESHEET`].
pub const STYLESHEET_PATH: &str = "/widget/widget.css";

/// Widget styles, scoped under `cw-` class names.
pub const STYLESHEET: &str = include_str!("widget.css");

/// Widget root: launcher plus the modal while open.
#[component]
pub fn ChatWidget(widget: WidgetView) -> impl IntoView {
    let dom_id = widget.dom_id();
    let base = format!("/widget/{}", widget.widget_id);
    let unmount = format!("navigator.sendBeacon('{base}/unmount')");
    let launcher_target = dom_id.clone();
    let close_url = format!("{base}/close");
    let toggle_url = format!("{base}/toggle");
    let root_id = dom_id.clone();
    let open = widget.open;
    let panel = widget.panel;

    view! {
        <div id=root_id class="cw-root" x-data="" x-on:pagehide.window=unmount>
            <ChatLauncher
                toggle_url=toggle_url
                widget_target=launcher_target
                open=open
            />
            {open.then(move || view! {
                <ChatModal close_url=close_url widget_target=dom_id panel=panel />
            })}
        </div>
    }
}

/// Bootstrap snippet the host shim places on every page.
#[component]
pub fn WidgetMount(
    /// Load HTMX and Alpine from the configured URLs.
    #[prop(default = true)]
    include_scripts: bool,
    htmx_src: String,
    alpine_src: String,
) -> impl IntoView {
    view! {
        <link rel="stylesheet" href=STYLESHEET_PATH />
        {include_scripts.then(move || view! {
            <script src=htmx_src></script>
            <script defer src=alpine_src></script>
        })}
        <div class="cw-mount" hx-get=MOUNT_PATH hx-trigger="load" hx-swap="outerHTML"></div>
    }
}

/// Render a view to an HTML string under a fresh reactive owner.
fn render_html<V: IntoView>(build: impl FnOnce() -> V) -> String {
    Owner::new().with(|| build().to_html())
}

/// Render the widget root fragment.
#[must_use]
pub fn render_widget(widget: WidgetView) -> String {
    render_html(move || view! { <ChatWidget widget=widget /> })
}

/// Render the chat panel fragment.
#[must_use]
pub fn render_panel(panel: PanelView) -> String {
    render_html(move || view! { <ChatPanel panel=panel /> })
}

/// Render the bootstrap snippet injected into host pages.
#[must_use]
pub fn render_mount(config: &WidgetConfig) -> String {
    let include_scripts = config.include_scripts;
    let htmx_src = config.htmx_src.clone();
    let alpine_src = config.alpine_src.clone();
    render_html(move || {
        view! {
            <WidgetMount include_scripts=include_scripts htmx_src=htmx_src alpine_src=alpine_src />
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::WidgetStore;

    fn snapshot(store: &WidgetStore, id: &str) -> WidgetView {
        store
            .with_instance(id, |w| WidgetView::from_instance(w, &WidgetConfig::default()))
            .unwrap()
    }

    #[test]
    fn test_closed_widget_renders_launcher_only() {
        let store = WidgetStore::new("Hi!");
        let id = store.mount();

        let html = render_widget(snapshot(&store, &id));

        assert!(html.contains(&format!("id=\"cw-{id}\"")));
        assert!(html.contains(&format!("/widget/{id}/toggle")));
        assert!(html.contains("Open chatbot"));
        assert!(!html.contains("cw-dialog"));
    }

    #[test]
    fn test_open_widget_renders_modal_and_greeting() {
        let store = WidgetStore::new("Hi there!");
        let id = store.mount();
        store.toggle(&id);

        let html = render_widget(snapshot(&store, &id));

        assert!(html.contains("cw-dialog"));
        assert!(html.contains("Ask the Book"));
        assert!(html.contains("Hi there!"));
        assert!(html.contains(&format!("/widget/{id}/close")));
        assert!(html.contains("Online"));
    }

    #[test]
    fn test_awaiting_panel_shows_typing_and_polls() {
        let store = WidgetStore::new("Hi!");
        let id = store.mount();
        store.begin(&id, "What is chapter 3 about?");

        let html = render_panel(snapshot(&store, &id).panel);

        assert!(html.contains("cw-typing"));
        assert!(html.contains("Thinking…"));
        assert!(html.contains(&format!("/widget/{id}/panel")));
        assert!(html.contains("load delay:400ms"));
        assert!(html.contains("disabled"));
        assert!(html.contains("What is chapter 3 about?"));
    }

    #[test]
    fn test_open_awaiting_panel_refreshes_only_itself() {
        let store = WidgetStore::new("Hi!");
        let id = store.mount();
        store.toggle(&id);
        store.begin(&id, "q");

        let html = render_widget(snapshot(&store, &id));

        let start = html.find("<section").unwrap();
        let end = start + html[start..].find('>').unwrap();
        let panel_tag = &html[start..=end];
        assert!(panel_tag.contains(&format!("id=\"cw-{id}-panel\"")));
        assert!(panel_tag.contains("hx-get"));
        assert!(panel_tag.contains("hx-target=\"this\""));
    }

    #[test]
    fn test_idle_panel_does_not_poll() {
        let store = WidgetStore::new("Hi!");
        let id = store.mount();

        let html = render_panel(snapshot(&store, &id).panel);

        assert!(!html.contains("cw-typing"));
        assert!(!html.contains("hx-get"));
        assert!(html.contains(&format!("/widget/{id}/messages")));
        assert!(html.contains("!message.trim()"));
    }

    #[test]
    fn test_message_text_is_escaped() {
        let store = WidgetStore::new("Hi!");
        let id = store.mount();
        store.begin(&id, "<script>alert(1)</script>");

        let html = render_panel(snapshot(&store, &id).panel);

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_mount_snippet() {
        let config = WidgetConfig::default();
        let html = render_mount(&config);
        assert!(html.contains(STYLESHEET_PATH));
        assert!(html.contains(MOUNT_PATH));
        assert!(html.contains(&config.htmx_src));

        let bare = render_mount(&WidgetConfig {
            include_scripts: false,
            ..WidgetConfig::default()
        });
        assert!(!bare.contains("<script"));
        assert!(bare.contains(MOUNT_PATH));
    }
}
