//! Toaster Component
//!
//! Renders the notice board; each notice removes itself after its TTL.

use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::notices::NoticeEvent;

#[component]
pub fn Toaster() -> impl IntoView {
    let ctx = use_app_context();
    let board = ctx.notices();
    let (notices, set_notices) = signal(board.notices());

    let listener = board.subscribe(Rc::new(move |event: &NoticeEvent| {
        if let NoticeEvent::Published(notice) = event {
            let id = notice.id;
            let millis = u32::try_from(notice.ttl.as_millis()).unwrap_or(u32::MAX);
            spawn_local(async move {
                TimeoutFuture::new(millis).await;
                if let Some(board) = ctx.try_notices() {
                    board.dismiss(id);
                }
            });
        }
        if let Some(board) = ctx.try_notices() {
            set_notices.set(board.notices());
        }
    }));
    on_cleanup(move || {
        if let Some(board) = ctx.try_notices() {
            board.unsubscribe(listener);
        }
    });

    view! {
        <div class="toaster" role="status">
            <For
                each=move || notices.get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div
                            class=notice.level.css_class()
                            on:click=move |_| {
                                ctx.notices().dismiss(id);
                            }
                        >
                            <div class="notice-title">{notice.title}</div>
                            <div class="notice-description">{notice.description}</div>
                        </div>
                    }
                }
            />
        </div>
    }
}
