use once_cell::sync::Lazy;
use std::future::Future;
use tokio::sync::mpsc::UnboundedReceiver;

pub static RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("Failed to build Tokio runtime")
});

pub fn runtime_handle() -> tokio::runtime::Handle {
    RUNTIME.handle().clone()
}

/// Drains `rx` on the GTK main loop, so `on_item` runs on the UI thread
/// no matter which runtime worker produced the item.
pub fn attach_to_main<T, F>(mut rx: UnboundedReceiver<T>, mut on_item: F)
where
    T: 'static,
    F: FnMut(T) + 'static,
{
    spawn_local(async move {
        while let Some(item) = rx.recv().await {
            on_item(item);
        }
    });
}

fn spawn_local<F>(fut: F)
where
    F: Future<Output = ()> + 'static,
{
    glib::MainContext::default().spawn_local(fut);
}
