//! Runtime abstraction layer for async operations
//!
//! Searches run as detached tasks. This module hides which executor runs
//! them (Tokio natively, `spawn_local` in the browser) and provides a delay
//! that works on both.

use crate::prelude::{Future, Pin};
use std::time::Duration;

/// A trait for spawning async tasks (object-safe version)
pub trait AsyncSpawner: Send + Sync + 'static {
    /// Spawn a future and return a handle to it
    fn spawn_boxed(
        &self,
        future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
    ) -> Box<dyn AsyncHandle>;
}

/// Handle to a spawned async task
pub trait AsyncHandle: Send + Sync {
    /// Check if the task is finished
    fn is_finished(&self) -> bool;

    /// Cancel the task
    fn cancel(&self);
}

/// Convenience function for spawning on the global runtime
pub fn spawn<F>(future: F) -> Box<dyn AsyncHandle>
where
    F: Future<Output = ()> + Send + 'static,
{
    runtime().spawn_boxed(Box::pin(future))
}

/// Default spawner implementations
pub mod spawners {
    use super::*;
    use futures::future::{AbortHandle, Abortable};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// Handle backed by an abort handle, for executors without native cancellation
    pub(crate) struct AbortableHandle {
        abort: AbortHandle,
        finished: Arc<AtomicBool>,
    }

    impl AsyncHandle for AbortableHandle {
        fn is_finished(&self) -> bool {
            self.finished.load(Ordering::Acquire) || self.abort.is_aborted()
        }

        fn cancel(&self) {
            self.abort.abort();
        }
    }

    /// Wrap `future` so it can be aborted and reports completion
    pub(crate) fn abortable(
        future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
    ) -> (impl Future<Output = ()> + Send + 'static, AbortableHandle) {
        let (abort, registration) = AbortHandle::new_pair();
        let finished = Arc::new(AtomicBool::new(false));
        let flag = finished.clone();
        let task = async move {
            let _ = Abortable::new(future, registration).await;
            flag.store(true, Ordering::Release);
        };
        (task, AbortableHandle { abort, finished })
    }

    #[cfg(feature = "tokio-runtime")]
    pub mod tokio_impl {
        use super::*;
        use ::tokio::task::JoinHandle;

        /// Tokio-based async spawner
        pub struct TokioSpawner;

        impl AsyncSpawner for TokioSpawner {
            fn spawn_boxed(
                &self,
                future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
            ) -> Box<dyn AsyncHandle> {
                let handle = ::tokio::spawn(future);
                Box::new(TokioHandle(handle))
            }
        }

        struct TokioHandle(JoinHandle<()>);

        impl AsyncHandle for TokioHandle {
            fn is_finished(&self) -> bool {
                self.0.is_finished()
            }

            fn cancel(&self) {
                self.0.abort();
            }
        }
    }

    #[cfg(feature = "wasm")]
    pub mod wasm {
        use super::*;

        /// WASM-compatible async spawner
        pub struct WasmSpawner;

        impl AsyncSpawner for WasmSpawner {
            fn spawn_boxed(
                &self,
                future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
            ) -> Box<dyn AsyncHandle> {
                let (task, handle) = abortable(future);
                wasm_bindgen_futures::spawn_local(task);
                Box::new(handle)
            }
        }
    }

    /// Runs each task to completion on its own OS thread
    pub struct ThreadSpawner;

    impl AsyncSpawner for ThreadSpawner {
        fn spawn_boxed(
            &self,
            future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
        ) -> Box<dyn AsyncHandle> {
            let (task, handle) = abortable(future);
            std::thread::spawn(move || futures::executor::block_on(task));
            Box::new(handle)
        }
    }
}

/// Async helpers shared by the controller
pub mod async_utils {
    use super::*;

    /// Unified async delay function that works across runtimes
    pub async fn async_delay(duration: Duration) {
        #[cfg(feature = "tokio-runtime")]
        {
            ::tokio::time::sleep(duration).await;
        }

        #[cfg(all(feature = "wasm", not(feature = "tokio-runtime")))]
        {
            let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
            let promise = js_sys::Promise::new(&mut |resolve, _reject| {
                if let Some(window) = web_sys::window() {
                    let _ = window
                        .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis);
                }
            });
            let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
        }

        #[cfg(not(any(feature = "tokio-runtime", feature = "wasm")))]
        {
            let (tx, rx) = futures::channel::oneshot::channel::<()>();
            std::thread::spawn(move || {
                std::thread::sleep(duration);
                let _ = tx.send(());
            });
            let _ = rx.await;
        }
    }
}

/// Global runtime instance
static RUNTIME: std::sync::OnceLock<Box<dyn AsyncSpawner>> = std::sync::OnceLock::new();

/// Initialize the runtime with a specific spawner
pub fn init_runtime(spawner: Box<dyn AsyncSpawner>) {
    if RUNTIME.set(spawner).is_err() {
        log::debug!("runtime already initialised, keeping the existing spawner");
    }
}

/// Get the global runtime spawner
pub fn runtime() -> &'static dyn AsyncSpawner {
    RUNTIME
        .get_or_init(|| {
            #[cfg(feature = "tokio-runtime")]
            {
                Box::new(spawners::tokio_impl::TokioSpawner)
            }

            #[cfg(all(feature = "wasm", not(feature = "tokio-runtime")))]
            {
                Box::new(spawners::wasm::WasmSpawner)
            }

            #[cfg(not(any(feature = "tokio-runtime", feature = "wasm")))]
            {
                Box::new(spawners::ThreadSpawner)
            }
        })
        .as_ref()
}
