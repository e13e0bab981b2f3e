//! Scrollable message timeline for the active session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rows are keyed by message id and each row watches only its own message
//! through a `Memo`, so a reveal tick re-renders the one message being
//! revealed instead of the whole list. The list keeps the newest message
//! in view.

#[cfg(test)]
#[path = "message_list_test.rs"]
mod message_list_test;

use leptos::prelude::*;

use crate::state::chat::ChatState;
use crate::state::timeline::{Message, Sender};
use crate::util::format::format_time;
use crate::util::markdown::render_markdown_html;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum MessageBody {
    /// Rendered HTML for assistant output.
    Markdown(String),
    Text(String),
}

/// Everything one row renders, derived from a single message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MessageRowModel {
    pub sender: &'static str,
    pub is_assistant: bool,
    /// User message not yet confirmed by the backend.
    pub is_pending: bool,
    pub is_revealing: bool,
    pub time: String,
    pub body: MessageBody,
}

impl MessageRowModel {
    pub(crate) fn new(message: &Message, is_revealing: bool) -> Self {
        let is_assistant = message.sender == Sender::Assistant;
        let body = if is_assistant {
            MessageBody::Markdown(render_markdown_html(&message.content))
        } else {
            MessageBody::Text(message.content.clone())
        };
        Self {
            sender: message.sender.as_str(),
            is_assistant,
            is_pending: !is_assistant && message.is_optimistic(),
            is_revealing,
            time: format_time(message.timestamp),
            body,
        }
    }
}

/// Message list with an empty-state hint and a "Thinking..." row while a
/// send is outstanding.
#[component]
pub fn MessageList() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    let message_ids = Memo::new(move |_| chat.with(|c| c.messages().iter().map(|m| m.id).collect::<Vec<_>>()));
    let empty_hint = Memo::new(move |_| {
        chat.with(|c| match (c.messages().is_empty(), c.is_loading()) {
            (true, true) => Some("Loading conversation..."),
            (true, false) => Some("Send a message to start chatting."),
            (false, _) => None,
        })
    });
    let sending = Memo::new(move |_| chat.with(ChatState::is_sending));

    Effect::new(move || {
        chat.with(|c| {
            let _ = c.messages().last().map(|m| m.content.len());
            let _ = c.is_sending();
        });

        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = messages_ref.get() {
                let scroll_height = el.scroll_height();
                el.set_scroll_top(scroll_height);
            }
        }
    });

    view! {
        <div class="chat-messages" node_ref=messages_ref>
            {move || empty_hint.get().map(|hint| view! { <div class="chat-messages__empty">{hint}</div> })}

            <For each=move || message_ids.get() key=|id| *id children=move |id| view! { <MessageRow id=id/> }/>

            {move || sending.get().then(|| view! { <div class="chat-messages__thinking">"Thinking..."</div> })}
        </div>
    }
}

/// One message bubble. Re-renders only when its own message changes.
#[component]
fn MessageRow(id: i64) -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let message = Memo::new(move |_| chat.with(|c| c.timeline().get(id).cloned()));
    let revealing = Memo::new(move |_| chat.with(|c| c.revealing_message_id() == Some(id)));

    move || {
        message.get().map(|msg| {
            let row = MessageRowModel::new(&msg, revealing.get());
            let body = match row.body {
                MessageBody::Markdown(html) => {
                    view! { <div class="chat-message__markdown" inner_html=html></div> }.into_any()
                }
                MessageBody::Text(text) => view! { <span class="chat-message__text">{text}</span> }.into_any(),
            };
            view! {
                <div
                    class="chat-message"
                    class:chat-message--user=!row.is_assistant
                    class:chat-message--assistant=row.is_assistant
                    class:chat-message--pending=row.is_pending
                    class:chat-message--revealing=row.is_revealing
                    data-sender=row.sender
                >
                    <div class="chat-message__content">{body}</div>
                    <span class="chat-message__time">{row.time}</span>
                </div>
            }
        })
    }
}
